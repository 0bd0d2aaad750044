use crate::logic::calculations::compute_adg;
use crate::models::{Animal, WeightRecord};
use crate::ui::components::FormField;
use crate::ui::Theme;
use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Widget},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightField {
    Date,
    Kg,
}

impl WeightField {
    pub fn label(&self) -> &'static str {
        match self {
            WeightField::Date => "Date",
            WeightField::Kg => "Weight (kg)",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            WeightField::Date => WeightField::Kg,
            WeightField::Kg => WeightField::Date,
        }
    }
}

/// Buffered input for the log-weight form.
#[derive(Debug, Clone)]
pub struct WeightForm {
    pub focused: WeightField,
    pub date: String,
    pub kg: String,
}

impl WeightForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            focused: WeightField::Kg,
            date: today.format("%Y-%m-%d").to_string(),
            kg: String::new(),
        }
    }

    pub fn value(&self, field: WeightField) -> &str {
        match field {
            WeightField::Date => &self.date,
            WeightField::Kg => &self.kg,
        }
    }

    pub fn buffer_mut(&mut self) -> &mut String {
        match self.focused {
            WeightField::Date => &mut self.date,
            WeightField::Kg => &mut self.kg,
        }
    }

    pub fn to_record(&self) -> std::result::Result<WeightRecord, String> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| format!("Invalid date '{}' (YYYY-MM-DD)", self.date))?;
        let kg: f64 = self
            .kg
            .trim()
            .parse()
            .map_err(|_| format!("Invalid weight '{}'", self.kg))?;
        if kg <= 0.0 {
            return Err("Weight must be positive".into());
        }
        Ok(WeightRecord::new(date, kg))
    }
}

pub struct WeightsScreen<'a> {
    pub animals: &'a [Animal],
    pub selected_animal: usize,
    pub form: Option<&'a WeightForm>,
    pub status_message: Option<&'a str>,
}

impl<'a> WeightsScreen<'a> {
    pub fn new(animals: &'a [Animal]) -> Self {
        Self {
            animals,
            selected_animal: 0,
            form: None,
            status_message: None,
        }
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_animal = index;
        self
    }

    pub fn with_form(mut self, form: Option<&'a WeightForm>) -> Self {
        self.form = form;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }

    fn selected(&self) -> Option<&Animal> {
        self.animals.get(self.selected_animal)
    }
}

impl Widget for WeightsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(10),   // Content
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Weigh-ins", Theme::title()),
            Span::styled(
                match self.selected() {
                    Some(a) => format!(" - {}", a.name),
                    None => " - no animals registered".to_string(),
                },
                Theme::dim(),
            ),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(chunks[1]);

        self.render_animal_list(content[0], buf);

        if let Some(form) = self.form {
            render_form(form, content[1], buf);
        } else {
            self.render_history(content[1], buf);
        }

        if let Some(msg) = self.status_message {
            let style = if msg.starts_with("Error") || msg.starts_with("Invalid") {
                Theme::warning()
            } else {
                Theme::success()
            };
            Paragraph::new(Span::styled(msg, style)).render(chunks[2], buf);
        }

        let nav = Line::from(vec![
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Animal ", Theme::nav_label()),
            Span::styled("[a]", Theme::nav_key()),
            Span::styled("Log weight ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[3], buf);
    }
}

impl WeightsScreen<'_> {
    fn render_animal_list(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Animals")
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        if self.animals.is_empty() {
            Paragraph::new(Span::styled("No animals registered", Theme::dim()))
                .render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .animals
            .iter()
            .enumerate()
            .map(|(i, animal)| {
                let style = if i == self.selected_animal {
                    Theme::selected()
                } else {
                    Style::default()
                };
                let line = Line::from(vec![
                    Span::styled(animal.name.as_str(), Theme::normal()),
                    Span::styled(format!(" ({})", animal.id), Theme::dim()),
                ]);
                ListItem::new(line).style(style)
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_history(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Weight Log")
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        let animal = match self.selected() {
            Some(a) => a,
            None => return,
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(4)])
            .split(inner);

        // ADG line above the log
        let adg_line = match compute_adg(&animal.weights) {
            Some(adg) => Line::from(vec![
                Span::styled("ADG from last two weigh-ins: ", Theme::dim()),
                Span::styled(
                    format!("{:+.3} kg/day", adg),
                    Style::default().fg(Theme::gain_color(adg, animal.target_daily_gain_kg)),
                ),
                Span::styled(
                    format!("  (target {:.2})", animal.target_daily_gain_kg),
                    Theme::dim(),
                ),
            ]),
            None => Line::from(Span::styled(
                "At least 2 weigh-ins needed to compute ADG",
                Theme::dim(),
            )),
        };
        Paragraph::new(adg_line).render(chunks[0], buf);

        if animal.weights.is_empty() {
            Paragraph::new(Span::styled("No weigh-ins recorded", Theme::dim()))
                .render(chunks[1], buf);
            return;
        }

        // Newest first for reading convenience
        let mut sorted: Vec<&WeightRecord> = animal.weights.iter().collect();
        sorted.sort_by(|a, b| a.date.cmp(&b.date));

        let header = Row::new(
            ["Date", "Weight"]
                .iter()
                .map(|h| Cell::from(*h).style(Theme::header())),
        );

        let rows: Vec<Row> = sorted
            .iter()
            .rev()
            .map(|record| {
                Row::new(vec![
                    Cell::from(record.date.format("%Y-%m-%d").to_string()),
                    Cell::from(format!("{:.1} kg", record.kg)),
                ])
            })
            .collect();

        let widths = [Constraint::Length(12), Constraint::Min(10)];
        Table::new(rows, widths).header(header).render(chunks[1], buf);
    }
}

fn render_form(form: &WeightForm, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title("Log Weight")
        .borders(Borders::ALL)
        .border_style(Theme::border_focused());
    let inner = block.inner(area);
    block.render(area, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    for (i, field) in [WeightField::Date, WeightField::Kg].iter().enumerate() {
        FormField::new(field.label(), form.value(*field))
            .focused(*field == form.focused)
            .render(chunks[i], buf);
    }

    let nav = Line::from(vec![
        Span::styled("[Tab]", Theme::nav_key()),
        Span::styled("Field ", Theme::nav_label()),
        Span::styled("[Enter]", Theme::nav_key()),
        Span::styled("Save ", Theme::nav_label()),
        Span::styled("[Esc]", Theme::nav_key()),
        Span::styled("Cancel", Theme::nav_label()),
    ]);
    Paragraph::new(nav).render(chunks[2], buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_prefills_today() {
        let today = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let form = WeightForm::new(today);
        assert_eq!(form.date, "2025-07-01");
        assert_eq!(form.focused, WeightField::Kg);
    }

    #[test]
    fn form_validates_record() {
        let mut form = WeightForm::new(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
        form.kg = "231.5".into();

        let record = form.to_record().unwrap();
        assert_eq!(record.kg, 231.5);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
    }

    #[test]
    fn form_rejects_non_positive_weight() {
        let mut form = WeightForm::new(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
        form.kg = "0".into();
        assert!(form.to_record().is_err());
        form.kg = "-4".into();
        assert!(form.to_record().is_err());
    }

    #[test]
    fn field_toggle() {
        assert_eq!(WeightField::Date.toggle(), WeightField::Kg);
        assert_eq!(WeightField::Kg.toggle(), WeightField::Date);
    }
}
