use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::constants::{MAX_INVENTORY_SIZE, SELL_PRICE_DIVISOR};
use crate::items::{Item, ItemKind};
use crate::session::GameSession;

/// Inventory browser: one row per carried item, equip slots above the list.
pub struct InventoryScreen {
    pub selected_index: usize,
    pub message: Option<String>,
}

impl InventoryScreen {
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

    pub fn selected_item_id(&self, session: &GameSession) -> Option<String> {
        session
            .character
            .inventory
            .get(self.selected_index)
            .cloned()
    }

    pub fn clamp_selection(&mut self, session: &GameSession) {
        let len = session.character.inventory.len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, session: &GameSession) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(area);

        self.draw_equipment(f, chunks[0], session);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        self.draw_list(f, body[0], session);
        self.draw_detail(f, body[1], session);
        self.draw_controls(f, chunks[2]);
    }

    fn draw_equipment(&self, f: &mut Frame, area: Rect, session: &GameSession) {
        let c = &session.character;
        let slot = |id: &Option<String>| {
            id.as_deref()
                .and_then(|id| session.items.get(id))
                .map(|item| item.name.clone())
                .unwrap_or_else(|| "-".to_string())
        };

        let lines = vec![
            Line::from(format!("Weapon: {}", slot(&c.equipped_weapon))),
            Line::from(format!("Armor:  {}", slot(&c.equipped_armor))),
        ];
        let block = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Equipped "));
        f.render_widget(block, area);
    }

    fn draw_list(&self, f: &mut Frame, area: Rect, session: &GameSession) {
        let mut lines = Vec::new();
        if session.character.inventory.is_empty() {
            lines.push(Line::styled(
                "  (empty)",
                Style::default().fg(Color::DarkGray),
            ));
        }
        for (i, item_id) in session.character.inventory.iter().enumerate() {
            let marker = if i == self.selected_index { ">" } else { " " };
            let label = session
                .items
                .get(item_id)
                .map(|item| format!("{} ({})", item.name, item.kind.name()))
                .unwrap_or_else(|| format!("{} (unknown)", item_id));
            let style = if i == self.selected_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::styled(format!("{} {}", marker, label), style));
        }

        let title = format!(
            " Inventory {}/{} ",
            session.character.inventory.len(),
            MAX_INVENTORY_SIZE
        );
        let list =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(list, area);
    }

    fn draw_detail(&self, f: &mut Frame, area: Rect, session: &GameSession) {
        let mut lines = Vec::new();

        let item = self
            .selected_item_id(session)
            .and_then(|id| session.items.get(&id).cloned());
        if let Some(item) = item {
            lines.extend(describe_item(&item));
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

    fn draw_controls(&self, f: &mut Frame, area: Rect) {
        let controls =
            Paragraph::new("Enter use/equip | W unequip weapon | A unequip armor | S sell | Esc back")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL));
        f.render_widget(controls, area);
    }
}

pub fn describe_item(item: &Item) -> Vec<Line<'static>> {
    let effect = format!("{:+} {}", item.effect.amount, item.effect.stat.name());
    let action = match item.kind {
        ItemKind::Consumable => format!("On use: {}", effect),
        ItemKind::Weapon | ItemKind::Armor => format!("While equipped: {}", effect),
    };
    vec![
        Line::styled(
            item.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::from(item.description.clone()),
        Line::from(""),
        Line::from(action),
        Line::from(format!(
            "Value: {} gold (sells for {})",
            item.cost,
            item.cost / SELL_PRICE_DIVISOR
        )),
    ]
}
