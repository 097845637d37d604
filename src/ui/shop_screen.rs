use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::items::Item;
use crate::session::GameSession;
use crate::ui::inventory_screen::describe_item;

/// The shop lists every catalog item at full price. Selling happens from
/// the inventory screen, so this one only buys.
pub struct ShopScreen {
    pub selected_index: usize,
    pub message: Option<String>,
}

impl ShopScreen {
    pub fn new() -> Self {
        Self {
            selected_index: 0,
            message: None,
        }
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self, list_len: usize) {
        if list_len > 0 {
            self.selected_index = (self.selected_index + 1).min(list_len - 1);
        }
    }

    pub fn stock<'a>(&self, session: &'a GameSession) -> Vec<&'a Item> {
        session.items.iter().collect()
    }

    pub fn selected_item_id(&self, session: &GameSession) -> Option<String> {
        self.stock(session)
            .get(self.selected_index)
            .map(|item| item.item_id.clone())
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, session: &GameSession) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(area);

        let header = Paragraph::new(format!("Gold: {}", session.character.gold))
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(header, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        let stock = self.stock(session);
        self.draw_stock(f, body[0], &stock);
        self.draw_detail(f, body[1], &stock);

        let controls = Paragraph::new("Enter buy | Esc back")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(controls, chunks[2]);
    }

    fn draw_stock(&self, f: &mut Frame, area: Rect, stock: &[&Item]) {
        let mut lines = Vec::new();
        for (i, item) in stock.iter().enumerate() {
            let marker = if i == self.selected_index { ">" } else { " " };
            let style = if i == self.selected_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::styled(
                format!("{} {:<20} {:>5}g", marker, item.name, item.cost),
                style,
            ));
        }

        let list =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Shop "));
        f.render_widget(list, area);
    }

    fn draw_detail(&self, f: &mut Frame, area: Rect, stock: &[&Item]) {
        let mut lines = Vec::new();
        if let Some(item) = stock.get(self.selected_index) {
            lines.extend(describe_item(item));
        }

        if let Some(message) = &self.message {
            lines.push(Line::from(""));
            lines.push(Line::styled(
                message.clone(),
                Style::default().fg(Color::Green),
            ));
        }

        let detail = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Details "))
            .wrap(ratatui::widgets::Wrap { trim: true });
        f.render_widget(detail, area);
    }
}
