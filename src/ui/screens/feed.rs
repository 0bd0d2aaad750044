use crate::logic::calculations::compute_feed_plan;
use crate::models::Animal;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

pub struct FeedScreen<'a> {
    pub animals: &'a [Animal],
    pub selected_animal: usize,
}

impl<'a> FeedScreen<'a> {
    pub fn new(animals: &'a [Animal]) -> Self {
        Self {
            animals,
            selected_animal: 0,
        }
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_animal = index;
        self
    }
}

impl Widget for FeedScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(10),   // Content
                Constraint::Length(1), // Nav
            ])
            .split(area);

        Paragraph::new(Span::styled("Feed Plan", Theme::title())).render(chunks[0], buf);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(chunks[1]);

        self.render_animal_list(content[0], buf);
        self.render_plan(content[1], buf);

        let nav = Line::from(vec![
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Animal ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

impl FeedScreen<'_> {
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

    fn render_plan(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Daily Ration")
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        let animal = match self.animals.get(self.selected_animal) {
            Some(a) => a,
            None => return,
        };

        let latest = match animal.latest_weight() {
            Some(w) => w,
            None => {
                Paragraph::new(Span::styled(
                    format!("No weigh-ins recorded for {}", animal.name),
                    Theme::dim(),
                ))
                .render(inner, buf);
                return;
            }
        };

        let plan = compute_feed_plan(latest.kg);

        let lines = vec![
            Line::from(vec![
                Span::styled("Body weight: ", Theme::dim()),
                Span::styled(format!("{:.1} kg", plan.body_weight_kg), Theme::normal()),
                Span::styled(
                    format!("  (weighed {})", latest.date.format("%Y-%m-%d")),
                    Theme::dim(),
                ),
            ]),
            Line::from(vec![]),
            Line::from(vec![
                Span::styled("Dry matter intake: ", Theme::dim()),
                Span::styled(format!("{:.2} kg/day", plan.daily_dmi_kg), Theme::highlight()),
                Span::styled("  (2.2% of body weight)", Theme::dim()),
            ]),
            Line::from(vec![
                Span::styled("  Forage (60%):      ", Theme::dim()),
                Span::styled(format!("{:.2} kg", plan.forage_kg), Theme::success()),
            ]),
            Line::from(vec![
                Span::styled("  Concentrate (40%): ", Theme::dim()),
                Span::styled(format!("{:.2} kg", plan.concentrate_kg), Theme::warning()),
            ]),
        ];

        Paragraph::new(lines).render(inner, buf);
    }
}
