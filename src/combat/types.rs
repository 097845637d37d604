use serde::{Deserialize, Serialize};

/// The fixed enemy roster. Each kind is a stat template; a fresh instance
/// is stamped out per encounter and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Goblin,
    Orc,
    Dragon,
}

impl EnemyKind {
    pub fn all() -> [EnemyKind; 3] {
        [EnemyKind::Goblin, EnemyKind::Orc, EnemyKind::Dragon]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Goblin => "Goblin",
            EnemyKind::Orc => "Orc",
            EnemyKind::Dragon => "Dragon",
        }
    }

    /// Picks the encounter tier for a character level: goblins up to level
    /// 2, orcs up to level 5, dragons beyond.
    pub fn for_level(level: u32) -> EnemyKind {
        if level <= 2 {
            EnemyKind::Goblin
        } else if level <= 5 {
            EnemyKind::Orc
        } else {
            EnemyKind::Dragon
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub strength: u32,
    pub magic: u32,
    pub xp_reward: u64,
    pub gold_reward: u32,
}

impl Enemy {
    /// Instantiates a full-health enemy from its kind's template.
    pub fn spawn(kind: EnemyKind) -> Self {
        let (health, strength, magic, xp_reward, gold_reward) = match kind {
            EnemyKind::Goblin => (50, 8, 2, 25, 10),
            EnemyKind::Orc => (80, 12, 5, 50, 25),
            EnemyKind::Dragon => (200, 25, 15, 200, 100),
        };

        Self {
            name: kind.name().to_string(),
            health,
            max_health: health,
            strength,
            magic,
            xp_reward,
            gold_reward,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }
}
