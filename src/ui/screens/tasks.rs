use crate::models::DueTask;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Widget},
};

pub struct TasksScreen<'a> {
    pub tasks: &'a [DueTask],
    pub horizon_days: i64,
    pub selected_index: usize,
}

impl<'a> TasksScreen<'a> {
    pub fn new(tasks: &'a [DueTask], horizon_days: i64) -> Self {
        Self {
            tasks,
            horizon_days,
            selected_index: 0,
        }
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }
}

impl Widget for TasksScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(10),   // Table
                Constraint::Length(1), // Nav
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_table(chunks[1], buf);

        let nav = Line::from(vec![
            Span::styled("[+/-]", Theme::nav_key()),
            Span::styled("Horizon ", Theme::nav_label()),
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Navigate ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

impl TasksScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Due Tasks", Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let info = Line::from(vec![
            Span::styled(
                format!("Next {} days", self.horizon_days),
                Theme::dim(),
            ),
            Span::styled(format!(" ({} tasks)", self.tasks.len()), Theme::dim()),
        ]);
        Paragraph::new(info).block(block).render(area, buf);
    }

    fn render_table(&self, area: Rect, buf: &mut Buffer) {
        if self.tasks.is_empty() {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border());
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new(Span::styled(
                format!("No tasks due within {} days", self.horizon_days),
                Theme::dim(),
            ))
            .render(inner, buf);
            return;
        }

        let header_cells = ["Due", "Task", "Animal"]
            .iter()
            .map(|h| Cell::from(*h).style(Theme::header()));
        let header = Row::new(header_cells).height(1);

        let rows: Vec<Row> = self
            .tasks
            .iter()
            .enumerate()
            .map(|(i, task)| {
                let style = if i == self.selected_index {
                    Theme::selected()
                } else {
                    Theme::normal()
                };

                let due = match task {
                    DueTask::Point { due_date, .. } => due_date.format("%Y-%m-%d").to_string(),
                    DueTask::Window {
                        window_start,
                        window_end,
                        ..
                    } => format!(
                        "{} - {}",
                        window_start.format("%Y-%m-%d"),
                        window_end.format("%Y-%m-%d")
                    ),
                };

                let kind_style = Style::default().fg(task.kind().color());
                let cells = vec![
                    Cell::from(due),
                    Cell::from(task.kind().as_str()).style(kind_style),
                    Cell::from(format!("{} ({})", task.animal_name(), task.animal_id())),
                ];

                Row::new(cells).style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(24),
            Constraint::Length(16),
            Constraint::Min(20),
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
