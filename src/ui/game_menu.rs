use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::quests;
use crate::session::GameSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Quests,
    Inventory,
    Shop,
    Explore,
    SaveAndQuit,
}

pub const MENU_ENTRIES: [MenuEntry; 5] = [
    MenuEntry::Quests,
    MenuEntry::Inventory,
    MenuEntry::Shop,
    MenuEntry::Explore,
    MenuEntry::SaveAndQuit,
];

impl MenuEntry {
    fn label(&self) -> &'static str {
        match self {
            MenuEntry::Quests => "Quests",
            MenuEntry::Inventory => "Inventory",
            MenuEntry::Shop => "Shop",
            MenuEntry::Explore => "Explore (Battle)",
            MenuEntry::SaveAndQuit => "Save & Quit",
        }
    }
}

/// The in-game hub: character sheet on the left, menu on the right.
pub struct GameMenuScreen {
    pub selected_index: usize,
    pub message: Option<String>,
}

impl GameMenuScreen {
    pub fn new() -> Self {
        Self {
            selected_index: 0,
            message: None,
        }
    }

    pub fn selected(&self) -> MenuEntry {
        MENU_ENTRIES[self.selected_index]
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        self.selected_index = (self.selected_index + 1).min(MENU_ENTRIES.len() - 1);
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, session: &GameSession) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        self.draw_character_sheet(f, chunks[0], session);
        self.draw_menu(f, chunks[1]);
    }

    fn draw_character_sheet(&self, f: &mut Frame, area: Rect, session: &GameSession) {
        let c = &session.character;
        let percent = quests::completion_percentage(c, &session.quests);
        let totals = quests::total_rewards_earned(c, &session.quests);

        let mut lines = vec![
            Line::from(format!("{} the {}", c.name, c.class.name())),
            Line::from(format!(
                "Level {}   XP {} ({} to next)",
                c.level,
                c.experience,
                c.xp_to_next_level()
            )),
            Line::from(format!("HP {}/{}", c.health, c.max_health)),
            Line::from(format!("STR {}   MAG {}", c.strength, c.magic)),
            Line::from(format!("Gold {}", c.gold)),
            Line::from(""),
            Line::from(format!(
                "Weapon: {}",
                c.equipped_weapon.as_deref().unwrap_or("-")
            )),
            Line::from(format!(
                "Armor:  {}",
                c.equipped_armor.as_deref().unwrap_or("-")
            )),
            Line::from(""),
            Line::from(format!(
                "Quests: {} active, {} done ({:.1}%)",
                c.active_quests.len(),
                c.completed_quests.len(),
                percent
            )),
            Line::from(format!(
                "Earned from quests: {} XP, {} gold",
                totals.total_xp, totals.total_gold
            )),
        ];

        if let Some(message) = &self.message {
            lines.push(Line::from(""));
            lines.push(Line::styled(
                message.clone(),
                Style::default().fg(Color::Green),
            ));
        }

        let sheet = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Character "));
        f.render_widget(sheet, area);
    }

    fn draw_menu(&self, f: &mut Frame, area: Rect) {
        let mut lines = Vec::new();
        for (i, entry) in MENU_ENTRIES.iter().enumerate() {
            let marker = if i == self.selected_index { ">" } else { " " };
            let style = if i == self.selected_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::styled(format!("{} {}", marker, entry.label()), style));
        }

        let menu = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Menu "));
        f.render_widget(menu, area);
    }
}
