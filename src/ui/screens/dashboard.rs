use crate::models::{DueTask, HerdSummary, WeightRecord};
use crate::ui::components::{adg_gauge, percent_gauge, weight_gauge};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

pub struct DashboardScreen<'a> {
    pub herd_name: &'a str,
    pub summary: &'a HerdSummary,
    pub tasks: &'a [DueTask],
    pub recent_weighins: &'a [(String, WeightRecord)],
    pub target_gain_kg: f64,
    pub status_message: Option<&'a str>,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(
        herd_name: &'a str,
        summary: &'a HerdSummary,
        tasks: &'a [DueTask],
        recent_weighins: &'a [(String, WeightRecord)],
        target_gain_kg: f64,
    ) -> Self {
        Self {
            herd_name,
            summary,
            tasks,
            recent_weighins,
            target_gain_kg,
            status_message: None,
        }
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }

    fn on_target_percent(&self) -> Option<f64> {
        if self.summary.adg_count == 0 {
            return None;
        }
        let meeting = self.summary.adg_count - self.summary.below_target.len();
        Some(meeting as f64 * 100.0 / self.summary.adg_count as f64)
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(5), // Gauges row
                Constraint::Min(8),    // Tasks and recent weigh-ins
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_gauges(chunks[1], buf);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);

        self.render_tasks(middle[0], buf);
        self.render_recent_weighins(middle[1], buf);

        self.render_status_message(chunks[3], buf);
        self.render_nav(chunks[4], buf);
    }
}

impl DashboardScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let title = format!(
            "HerdOps - {} ({} head)",
            self.herd_name, self.summary.head_count
        );

        let block = Block::default()
            .title(Span::styled(title, Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let info = format!(
            "{} weighed, {} with growth data",
            self.summary.weighed_count, self.summary.adg_count
        );
        Paragraph::new(Span::styled(info, Theme::dim()))
            .block(block)
            .render(area, buf);
    }

    fn render_gauges(&self, area: Rect, buf: &mut Buffer) {
        let gauge_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(34),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
            ])
            .split(area);

        weight_gauge("Avg Weight", self.summary.average_weight_kg)
            .render(gauge_chunks[0], buf);
        adg_gauge("Herd ADG", self.summary.average_adg_kg, self.target_gain_kg)
            .render(gauge_chunks[1], buf);
        percent_gauge("On Target", self.on_target_percent()).render(gauge_chunks[2], buf);
    }

    fn render_tasks(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Upcoming Tasks", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.tasks.is_empty() {
            Paragraph::new(Span::styled("No tasks due", Theme::dim())).render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .tasks
            .iter()
            .take(inner.height as usize)
            .map(|task| {
                let kind_style = Style::default().fg(task.kind().color());
                let line = Line::from(vec![
                    Span::styled(
                        task.sort_date().format("%m/%d").to_string(),
                        Theme::dim(),
                    ),
                    Span::raw(" "),
                    Span::styled(task.kind().as_str(), kind_style),
                    Span::raw(" "),
                    Span::styled(task.animal_name(), Theme::normal()),
                ]);
                ListItem::new(line)
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_recent_weighins(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Recent Weigh-ins", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.recent_weighins.is_empty() {
            Paragraph::new(Span::styled("No weigh-ins recorded", Theme::dim()))
                .render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .recent_weighins
            .iter()
            .take(5)
            .map(|(name, record)| {
                let line = Line::from(vec![
                    Span::styled(record.date.format("%m/%d").to_string(), Theme::dim()),
                    Span::raw(" "),
                    Span::styled(name.as_str(), Theme::normal()),
                    Span::raw(" "),
                    Span::styled(format!("{:.1} kg", record.kg), Theme::highlight()),
                ]);
                ListItem::new(line)
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_status_message(&self, area: Rect, buf: &mut Buffer) {
        if let Some(msg) = self.status_message {
            let style = if msg.contains("Error") || msg.contains("Invalid") {
                Theme::warning()
            } else {
                Theme::success()
            };
            Paragraph::new(Span::styled(msg, style)).render(area, buf);
        }
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        let nav = Line::from(vec![
            Span::styled("[1]", Theme::nav_key()),
            Span::styled("Dashboard ", Theme::nav_label()),
            Span::styled("[2]", Theme::nav_key()),
            Span::styled("Animals ", Theme::nav_label()),
            Span::styled("[3]", Theme::nav_key()),
            Span::styled("Weights ", Theme::nav_label()),
            Span::styled("[4]", Theme::nav_key()),
            Span::styled("Tasks ", Theme::nav_label()),
            Span::styled("[5]", Theme::nav_key()),
            Span::styled("Feed ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);

        Paragraph::new(nav).render(area, buf);
    }
}
