use chrono::DateTime;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::character::manager::CharacterInfo;

pub struct CharacterSelectScreen {
    pub selected_index: usize,
}

impl CharacterSelectScreen {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, characters: &[CharacterInfo]) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(4),
                Constraint::Length(1),
            ])
            .split(area);

        let title = Paragraph::new("Quest Chronicles")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let mut lines = Vec::new();
        for (i, info) in characters.iter().enumerate() {
            let marker = if i == self.selected_index { ">" } else { " " };
            let line = if info.is_corrupted {
                format!("{} {:<18} [corrupted save]", marker, info.filename)
            } else {
                let saved = DateTime::from_timestamp(info.last_saved, 0)
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                format!(
                    "{} {:<18} Lv {:<3} {:<8} {}",
                    marker, info.name, info.level, info.class_name, saved
                )
            };
            let style = if i == self.selected_index {
                Style::default().fg(Color::Yellow)
            } else if info.is_corrupted {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            lines.push(Line::styled(line, style));
        }
        let list = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Characters "));
        f.render_widget(list, chunks[1]);

        let controls = Paragraph::new("Enter play | N new | D delete | Q quit")
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(controls, chunks[2]);
    }
}
