use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct GaugeWidget<'a> {
    title: &'a str,
    value: Option<f64>,
    unit: &'a str,
    min: f64,
    max: f64,
    thresholds: Vec<(f64, Color)>,
    precision: usize,
}

impl<'a> GaugeWidget<'a> {
    pub fn new(title: &'a str, value: Option<f64>, unit: &'a str) -> Self {
        Self {
            title,
            value,
            unit,
            min: 0.0,
            max: 100.0,
            thresholds: Vec::new(),
            precision: 1,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn thresholds(mut self, thresholds: Vec<(f64, Color)>) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    fn color_for(&self, value: f64) -> Color {
        for (threshold, color) in self.thresholds.iter().rev() {
            if value >= *threshold {
                return *color;
            }
        }
        Theme::FG
    }
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        match self.value {
            Some(value) => {
                let color = self.color_for(value);
                let value_str = format!("{:.prec$}{}", value, self.unit, prec = self.precision);

                let value_line =
                    Line::from(vec![Span::styled(value_str, Style::default().fg(color))]);
                Paragraph::new(value_line).render(inner, buf);

                // Render bar if space allows
                if inner.height >= 2 {
                    let bar_area = Rect {
                        x: inner.x,
                        y: inner.y + 1,
                        width: inner.width,
                        height: 1,
                    };

                    let ratio = ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
                    let filled = (bar_area.width as f64 * ratio) as u16;

                    for x in bar_area.x..bar_area.x + bar_area.width {
                        let ch = if x < bar_area.x + filled {
                            '█'
                        } else {
                            '░'
                        };
                        buf[(x, bar_area.y)].set_char(ch).set_fg(color);
                    }
                }
            }
            None => {
                let na_line = Line::from(vec![Span::styled("N/A", Theme::dim())]);
                Paragraph::new(na_line).render(inner, buf);
            }
        }
    }
}

/// Body weight for young stock, roughly birth weight up to service weight.
pub fn weight_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, " kg")
        .range(0.0, 700.0)
        .precision(0)
        .thresholds(vec![(0.0, Theme::FG)])
}

/// Average daily gain against a target. Thresholds follow the target so a
/// herd with a 1.0 kg/day goal colors differently than one at 0.6.
pub fn adg_gauge<'a>(title: &'a str, value: Option<f64>, target_kg: f64) -> GaugeWidget<'a> {
    GaugeWidget::new(title, value, " kg/d")
        .range(-0.5, target_kg.max(0.1) * 2.0)
        .precision(2)
        .thresholds(vec![
            (-1000.0, Theme::GAIN_BEHIND),
            (target_kg * 0.75, Theme::GAIN_NEAR),
            (target_kg, Theme::GAIN_ON_TARGET),
        ])
}

/// Share of weighed animals meeting their gain target.
pub fn percent_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "%")
        .range(0.0, 100.0)
        .precision(0)
        .thresholds(vec![
            (0.0, Theme::ERROR),
            (50.0, Theme::WARNING),
            (80.0, Theme::SUCCESS),
        ])
}
