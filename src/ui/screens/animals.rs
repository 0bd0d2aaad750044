use crate::logic::calculations::compute_adg;
use crate::models::Animal;
use crate::ui::components::FormField;
use crate::ui::Theme;
use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Widget},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimalField {
    Id,
    Name,
    BirthDate,
    Breed,
    TargetGain,
}

impl AnimalField {
    pub fn all() -> &'static [AnimalField] {
        &[
            AnimalField::Id,
            AnimalField::Name,
            AnimalField::BirthDate,
            AnimalField::Breed,
            AnimalField::TargetGain,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnimalField::Id => "Animal ID",
            AnimalField::Name => "Name",
            AnimalField::BirthDate => "Birth Date",
            AnimalField::Breed => "Breed",
            AnimalField::TargetGain => "Target Gain (kg/day)",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            AnimalField::Id => "e.g. SE-0123",
            AnimalField::Name => "e.g. Bella",
            AnimalField::BirthDate => "YYYY-MM-DD",
            AnimalField::Breed => "e.g. SRB, Holstein",
            AnimalField::TargetGain => "e.g. 0.8",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            AnimalField::Id => AnimalField::Name,
            AnimalField::Name => AnimalField::BirthDate,
            AnimalField::BirthDate => AnimalField::Breed,
            AnimalField::Breed => AnimalField::TargetGain,
            AnimalField::TargetGain => AnimalField::Id,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            AnimalField::Id => AnimalField::TargetGain,
            AnimalField::Name => AnimalField::Id,
            AnimalField::BirthDate => AnimalField::Name,
            AnimalField::Breed => AnimalField::BirthDate,
            AnimalField::TargetGain => AnimalField::Breed,
        }
    }
}

/// Buffered input for the add-animal form. Validation happens only on
/// submit, so partially typed values never block navigation.
#[derive(Debug, Clone)]
pub struct AnimalForm {
    pub focused: AnimalField,
    pub id: String,
    pub name: String,
    pub birth_date: String,
    pub breed: String,
    pub target_gain: String,
}

impl AnimalForm {
    pub fn new(default_target_gain: f64) -> Self {
        Self {
            focused: AnimalField::Id,
            id: String::new(),
            name: String::new(),
            birth_date: String::new(),
            breed: String::new(),
            target_gain: format!("{}", default_target_gain),
        }
    }

    pub fn value(&self, field: AnimalField) -> &str {
        match field {
            AnimalField::Id => &self.id,
            AnimalField::Name => &self.name,
            AnimalField::BirthDate => &self.birth_date,
            AnimalField::Breed => &self.breed,
            AnimalField::TargetGain => &self.target_gain,
        }
    }

    pub fn buffer_mut(&mut self) -> &mut String {
        match self.focused {
            AnimalField::Id => &mut self.id,
            AnimalField::Name => &mut self.name,
            AnimalField::BirthDate => &mut self.birth_date,
            AnimalField::Breed => &mut self.breed,
            AnimalField::TargetGain => &mut self.target_gain,
        }
    }

    /// Validate the buffers into an `Animal`, or explain what is wrong.
    pub fn to_animal(&self) -> std::result::Result<Animal, String> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err("Animal ID is required".into());
        }
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name is required".into());
        }
        let birth_date = NaiveDate::parse_from_str(self.birth_date.trim(), "%Y-%m-%d")
            .map_err(|_| format!("Invalid birth date '{}' (YYYY-MM-DD)", self.birth_date))?;
        let breed = self.breed.trim();
        if breed.is_empty() {
            return Err("Breed is required".into());
        }
        let target_gain: f64 = self
            .target_gain
            .trim()
            .parse()
            .map_err(|_| format!("Invalid target gain '{}'", self.target_gain))?;
        if target_gain < 0.0 {
            return Err("Target gain must not be negative".into());
        }

        Ok(Animal::new(id, name, birth_date, breed, target_gain))
    }
}

pub struct AnimalsScreen<'a> {
    pub animals: &'a [Animal],
    pub selected_index: usize,
    pub form: Option<&'a AnimalForm>,
    pub status_message: Option<&'a str>,
}

impl<'a> AnimalsScreen<'a> {
    pub fn new(animals: &'a [Animal]) -> Self {
        Self {
            animals,
            selected_index: 0,
            form: None,
            status_message: None,
        }
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn with_form(mut self, form: Option<&'a AnimalForm>) -> Self {
        self.form = form;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for AnimalsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(form) = self.form {
            render_form(form, self.status_message, area, buf);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(10),   // Table
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_table(chunks[1], buf);
        render_status(self.status_message, chunks[2], buf);

        let nav = Line::from(vec![
            Span::styled("[a]", Theme::nav_key()),
            Span::styled("Add ", Theme::nav_label()),
            Span::styled("[d]", Theme::nav_key()),
            Span::styled("Delete ", Theme::nav_label()),
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Navigate ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[3], buf);
    }
}

impl AnimalsScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Animals", Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let info = Span::styled(format!("{} registered", self.animals.len()), Theme::dim());
        Paragraph::new(info).block(block).render(area, buf);
    }

    fn render_table(&self, area: Rect, buf: &mut Buffer) {
        let header_cells = ["ID", "Name", "Born", "Breed", "Target", "Latest", "ADG"]
            .iter()
            .map(|h| Cell::from(*h).style(Theme::header()));
        let header = Row::new(header_cells).height(1);

        let rows: Vec<Row> = self
            .animals
            .iter()
            .enumerate()
            .map(|(i, animal)| {
                let style = if i == self.selected_index {
                    Theme::selected()
                } else {
                    Theme::normal()
                };

                let adg = compute_adg(&animal.weights);
                let adg_cell = match adg {
                    Some(v) => Cell::from(format!("{:+.2}", v)).style(Style::default().fg(
                        Theme::gain_color(v, animal.target_daily_gain_kg),
                    )),
                    None => Cell::from("-").style(Theme::dim()),
                };

                let cells = vec![
                    Cell::from(animal.id.as_str()),
                    Cell::from(animal.name.as_str()),
                    Cell::from(animal.birth_date.format("%Y-%m-%d").to_string()),
                    Cell::from(animal.breed.as_str()),
                    Cell::from(format!("{:.2}", animal.target_daily_gain_kg)),
                    Cell::from(
                        animal
                            .latest_weight()
                            .map(|w| format!("{:.0} kg", w.kg))
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                    adg_cell,
                ];

                Row::new(cells).style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(10),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Min(8),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            )
            .highlight_style(Theme::selected());

        let mut state = TableState::default();
        state.select(Some(self.selected_index));
        ratatui::widgets::StatefulWidget::render(table, area, buf, &mut state);
    }
}

fn render_status(status: Option<&str>, area: Rect, buf: &mut Buffer) {
    if let Some(msg) = status {
        let style = if msg.starts_with("Error") || msg.starts_with("Invalid") {
            Theme::warning()
        } else {
            Theme::success()
        };
        Paragraph::new(Span::styled(msg, style)).render(area, buf);
    }
}

fn render_form(form: &AnimalForm, status: Option<&str>, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Title
            Constraint::Length(17), // Form: 5 fields * 3 lines + borders
            Constraint::Length(1),  // Status message
            Constraint::Length(1),  // Nav
            Constraint::Min(0),
        ])
        .split(area);

    let title = Line::from(vec![
        Span::styled("Animals", Theme::title()),
        Span::styled(" - Register new animal", Theme::dim()),
    ]);
    Paragraph::new(title).render(chunks[0], buf);

    let block = Block::default()
        .title("New Animal")
        .borders(Borders::ALL)
        .border_style(Theme::border());
    let inner = block.inner(chunks[1]);
    block.render(chunks[1], buf);

    let constraints: Vec<Constraint> = AnimalField::all()
        .iter()
        .map(|_| Constraint::Length(3))
        .collect();
    let field_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, field) in AnimalField::all().iter().enumerate() {
        FormField::new(field.label(), form.value(*field))
            .hint(field.hint())
            .focused(*field == form.focused)
            .render(field_areas[i], buf);
    }

    render_status(status, chunks[2], buf);

    let nav = Line::from(vec![
        Span::styled("[Tab/↑↓]", Theme::nav_key()),
        Span::styled("Field ", Theme::nav_label()),
        Span::styled("[Enter]", Theme::nav_key()),
        Span::styled("Save ", Theme::nav_label()),
        Span::styled("[Esc]", Theme::nav_key()),
        Span::styled("Cancel", Theme::nav_label()),
    ]);
    Paragraph::new(nav).render(chunks[3], buf);
}
