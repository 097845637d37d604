use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::character::class::CharacterClass;

/// Name entry plus class picker.
pub struct CharacterCreationScreen {
    pub name_input: String,
    pub class_index: usize,
    pub validation_error: Option<String>,
}

impl CharacterCreationScreen {
    pub fn new() -> Self {
        Self {
            name_input: String::new(),
            class_index: 0,
            validation_error: None,
        }
    }

    pub fn handle_char_input(&mut self, c: char) {
        if self.name_input.chars().count() < 24 {
            self.name_input.push(c);
            self.validation_error = None;
        }
    }

    pub fn handle_backspace(&mut self) {
        self.name_input.pop();
        self.validation_error = None;
    }

    pub fn next_class(&mut self) {
        self.class_index = (self.class_index + 1) % CharacterClass::all().len();
    }

    pub fn previous_class(&mut self) {
        let count = CharacterClass::all().len();
        self.class_index = (self.class_index + count - 1) % count;
    }

    pub fn selected_class(&self) -> CharacterClass {
        CharacterClass::all()[self.class_index]
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Length(3), // Name input
                Constraint::Length(1), // Spacer
                Constraint::Length(7), // Class picker
                Constraint::Length(2), // Validation
                Constraint::Min(0),    // Filler
                Constraint::Length(1), // Controls
            ])
            .split(area);

        let title = Paragraph::new("Create Your Hero")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let input = Paragraph::new(format!("{}_", self.name_input))
            .block(Block::default().borders(Borders::ALL).title(" Name "));
        f.render_widget(input, chunks[1]);

        let mut class_lines = Vec::new();
        for (i, class) in CharacterClass::all().iter().enumerate() {
            let stats = class.base_stats();
            let marker = if i == self.class_index { ">" } else { " " };
            let line = format!(
                "{} {:<8} HP {:<4} STR {:<3} MAG {:<3} {}",
                marker,
                class.name(),
                stats.health,
                stats.strength,
                stats.magic,
                class.description()
            );
            let style = if i == self.class_index {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            class_lines.push(Line::styled(line, style));
        }
        let classes = Paragraph::new(class_lines)
            .block(Block::default().borders(Borders::ALL).title(" Class "));
        f.render_widget(classes, chunks[3]);

        if let Some(error) = &self.validation_error {
            let err = Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red));
            f.render_widget(err, chunks[4]);
        }

        let controls = Paragraph::new("Up/Down class | Enter create | Esc back")
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(controls, chunks[6]);
    }
}
