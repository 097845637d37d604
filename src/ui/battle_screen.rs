use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::combat::{Battle, BattleState, CombatEvent};
use crate::constants::REVIVE_COST;
use crate::session::GameSession;

const LOG_CAPACITY: usize = 30;

/// Battle view: health bars up top, a scrolling combat log below.
pub struct BattleScreen {
    log: Vec<String>,
}

impl BattleScreen {
    pub fn new() -> Self {
        Self { log: Vec::new() }
    }

    pub fn push_events(&mut self, events: &[CombatEvent], enemy_name: &str) {
        for event in events {
            self.log.push(describe_event(event, enemy_name));
        }
        if self.log.len() > LOG_CAPACITY {
            let drop = self.log.len() - LOG_CAPACITY;
            self.log.drain(..drop);
        }
    }

    pub fn push_message(&mut self, message: String) {
        self.log.push(message);
        if self.log.len() > LOG_CAPACITY {
            self.log.remove(0);
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, session: &GameSession, battle: &Battle) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(area);

        let c = &session.character;
        let enemy = battle.enemy();

        draw_health_bar(
            f,
            chunks[0],
            &format!("{} (lv {})", c.name, c.level),
            c.health,
            c.max_health,
            Color::Green,
        );
        draw_health_bar(
            f,
            chunks[1],
            &enemy.name,
            enemy.health,
            enemy.max_health,
            Color::Red,
        );

        self.draw_log(f, chunks[2], battle);
        self.draw_controls(f, chunks[3], session, battle);
    }

    fn draw_log(&self, f: &mut Frame, area: Rect, battle: &Battle) {
        let visible = area.height.saturating_sub(2) as usize;
        let start = self.log.len().saturating_sub(visible);
        let lines: Vec<Line> = self.log[start..]
            .iter()
            .map(|entry| Line::from(entry.clone()))
            .collect();

        let title = format!(" Round {} ", battle.rounds() + 1);
        let log =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(log, area);
    }

    fn draw_controls(&self, f: &mut Frame, area: Rect, session: &GameSession, battle: &Battle) {
        let text = match battle.state() {
            BattleState::Active => {
                format!(
                    "A attack | S {} | F flee",
                    session.character.class.special_ability_name()
                )
            }
            BattleState::PlayerWon | BattleState::Escaped => "Enter continue".to_string(),
            BattleState::EnemyWon => {
                if session.can_afford_revive() {
                    format!("R revive ({} gold) | Enter give up", REVIVE_COST)
                } else {
                    "Enter give up".to_string()
                }
            }
        };

        let controls = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(controls, area);
    }
}

fn draw_health_bar(
    f: &mut Frame,
    area: Rect,
    label: &str,
    health: u32,
    max_health: u32,
    color: Color,
) {
    let ratio = if max_health == 0 {
        0.0
    } else {
        health as f64 / max_health as f64
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", label)))
        .gauge_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .label(format!("{}/{}", health, max_health))
        .ratio(ratio);
    f.render_widget(gauge, area);
}

pub fn describe_event(event: &CombatEvent, enemy_name: &str) -> String {
    match event {
        CombatEvent::PlayerAttack { damage } => {
            format!("You hit the {} for {} damage.", enemy_name, damage)
        }
        CombatEvent::SpecialAbility { ability, damage } => {
            format!("{} hits the {} for {} damage!", ability, enemy_name, damage)
        }
        CombatEvent::SpecialMissed { ability } => format!("{} misses!", ability),
        CombatEvent::Healed { amount } => format!("You recover {} health.", amount),
        CombatEvent::FleeSucceeded => "You slip away from the fight.".to_string(),
        CombatEvent::FleeFailed => "You fail to escape!".to_string(),
        CombatEvent::EnemyAttack { damage } => {
            format!("The {} hits you for {} damage.", enemy_name, damage)
        }
        CombatEvent::EnemyDefeated => format!("The {} is defeated!", enemy_name),
        CombatEvent::PlayerDefeated => "You fall to the ground...".to_string(),
    }
}
