use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::quests::{self, Quest};
use crate::session::GameSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestTab {
    Available,
    Active,
    Completed,
}

impl QuestTab {
    fn title(&self) -> &'static str {
        match self {
            QuestTab::Available => "Available",
            QuestTab::Active => "Active",
            QuestTab::Completed => "Completed",
        }
    }
}

/// Quest log with three tabs. The selected index is per-tab so switching
/// tabs does not leave the cursor past the end of a shorter list.
pub struct QuestScreen {
    pub tab: QuestTab,
    pub selected_index: usize,
    pub message: Option<String>,
}

impl QuestScreen {
    pub fn new() -> Self {
        Self {
            tab: QuestTab::Available,
            selected_index: 0,
            message: None,
        }
    }

    pub fn next_tab(&mut self) {
        self.tab = match self.tab {
            QuestTab::Available => QuestTab::Active,
            QuestTab::Active => QuestTab::Completed,
            QuestTab::Completed => QuestTab::Available,
        };
        self.selected_index = 0;
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self, list_len: usize) {
        if list_len > 0 {
            self.selected_index = (self.selected_index + 1).min(list_len - 1);
        }
    }

    /// The quests shown under the current tab, in catalog order.
    pub fn visible_quests<'a>(&self, session: &'a GameSession) -> Vec<&'a Quest> {
        match self.tab {
            QuestTab::Available => quests::available_quests(&session.character, &session.quests),
            QuestTab::Active => quests::active_quests(&session.character, &session.quests),
            QuestTab::Completed => quests::completed_quests(&session.character, &session.quests),
        }
    }

    pub fn selected_quest_id(&self, session: &GameSession) -> Option<String> {
        self.visible_quests(session)
            .get(self.selected_index)
            .map(|q| q.quest_id.clone())
    }

    pub fn clamp_selection(&mut self, session: &GameSession) {
        let len = self.visible_quests(session).len();
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
                Constraint::Length(2),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(area);

        self.draw_header(f, chunks[0], session);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);

        let visible = self.visible_quests(session);
        self.draw_list(f, body[0], &visible);
        self.draw_detail(f, body[1], session, &visible);
        self.draw_controls(f, chunks[2]);
    }

    fn draw_header(&self, f: &mut Frame, area: Rect, session: &GameSession) {
        let percent = quests::completion_percentage(&session.character, &session.quests);
        let tabs = [QuestTab::Available, QuestTab::Active, QuestTab::Completed]
            .iter()
            .map(|t| {
                if *t == self.tab {
                    format!("[{}]", t.title())
                } else {
                    format!(" {} ", t.title())
                }
            })
            .collect::<Vec<_>>()
            .join("  ");

        let header = Paragraph::new(vec![Line::from(format!(
            "{}    completion {:.1}%",
            tabs, percent
        ))]);
        f.render_widget(header, area);
    }

    fn draw_list(&self, f: &mut Frame, area: Rect, visible: &[&Quest]) {
        let mut lines = Vec::new();
        if visible.is_empty() {
            lines.push(Line::styled(
                "  (nothing here)",
                Style::default().fg(Color::DarkGray),
            ));
        }
        for (i, quest) in visible.iter().enumerate() {
            let marker = if i == self.selected_index { ">" } else { " " };
            let style = if i == self.selected_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::styled(
                format!("{} {} (lv {})", marker, quest.title, quest.required_level),
                style,
            ));
        }

        let list = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", self.tab.title())),
        );
        f.render_widget(list, area);
    }

    fn draw_detail(&self, f: &mut Frame, area: Rect, session: &GameSession, visible: &[&Quest]) {
        let mut lines = Vec::new();

        if let Some(quest) = visible.get(self.selected_index) {
            lines.push(Line::styled(
                quest.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::from(quest.description.clone()));
            lines.push(Line::from(""));
            lines.push(Line::from(format!(
                "Reward: {} XP, {} gold",
                quest.reward_xp, quest.reward_gold
            )));
            lines.push(Line::from(format!(
                "Requires level {}",
                quest.required_level
            )));

            match quests::prerequisite_chain(&quest.quest_id, &session.quests) {
                Ok(chain) if chain.len() > 1 => {
                    lines.push(Line::from(format!("Chain: {}", chain.join(" -> "))));
                }
                Ok(_) => {}
                Err(_) => {
                    lines.push(Line::styled(
                        "Chain: (broken prerequisite data)",
                        Style::default().fg(Color::Red),
                    ));
                }
            }
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
        let text = match self.tab {
            QuestTab::Available => "Enter accept | Tab switch | Esc back",
            QuestTab::Active => "Enter complete | X abandon | Tab switch | Esc back",
            QuestTab::Completed => "Tab switch | Esc back",
        };
        let controls = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(controls, area);
    }
}
