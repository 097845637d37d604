//! A running game session: the loaded character plus the immutable
//! catalogs. The front end owns exactly one of these at a time; all state
//! flows through it rather than through process-wide globals.

use rand::Rng;
use tracing::info;

use crate::character::record::Character;
use crate::combat::engine::{Battle, BattleRewards, BattleState};
use crate::combat::types::{Enemy, EnemyKind};
use crate::constants::REVIVE_COST;
use crate::error::GameError;
use crate::items::types::ItemCatalog;
use crate::quests::types::QuestCatalog;

/// Rewards actually applied to the character after a victory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VictorySummary {
    pub xp: u64,
    pub gold: u32,
    pub levels_gained: u32,
}

pub struct GameSession {
    pub character: Character,
    pub quests: QuestCatalog,
    pub items: ItemCatalog,
}

impl GameSession {
    pub fn new(character: Character, quests: QuestCatalog, items: ItemCatalog) -> Self {
        Self {
            character,
            quests,
            items,
        }
    }

    /// Starts a random encounter scaled to the character's level.
    pub fn start_encounter(&self) -> Result<Battle, GameError> {
        let kind = EnemyKind::for_level(self.character.level);
        Battle::new(&self.character, Enemy::spawn(kind))
    }

    /// Applies the rewards of a won battle to the character. Returns `None`
    /// for battles that did not end in a victory.
    pub fn finish_battle(&mut self, battle: &Battle) -> Result<Option<VictorySummary>, GameError> {
        let Some(BattleRewards { xp, gold }) = battle.rewards() else {
            return Ok(None);
        };

        let levels_gained = self.character.gain_experience(xp)?;
        self.character.add_gold(gold);
        info!(
            name = %self.character.name,
            xp,
            gold,
            levels_gained,
            "battle rewards applied"
        );
        Ok(Some(VictorySummary {
            xp,
            gold,
            levels_gained,
        }))
    }

    /// Whether the character has enough gold to buy a revive.
    pub fn can_afford_revive(&self) -> bool {
        self.character.gold >= REVIVE_COST
    }

    /// Pays the revive cost and brings a dead character back at half
    /// health. Gold is untouched if the character cannot afford it.
    pub fn revive_for_gold(&mut self) -> Result<(), GameError> {
        if !self.character.is_dead() {
            return Ok(());
        }
        self.character.spend_gold(REVIVE_COST)?;
        self.character.revive();
        info!(name = %self.character.name, cost = REVIVE_COST, "character revived");
        Ok(())
    }

    /// Runs a battle to its terminal state using a fixed action source.
    /// Used by tests and scriptable front ends; the interactive UI advances
    /// the battle turn by turn instead.
    pub fn run_battle<F>(
        &mut self,
        mut battle: Battle,
        rng: &mut impl Rng,
        mut next_action: F,
    ) -> Result<BattleState, GameError>
    where
        F: FnMut(&Battle, &Character) -> crate::combat::engine::PlayerAction,
    {
        while !battle.is_over() {
            let action = next_action(&battle, &self.character);
            battle.take_turn(&mut self.character, action, rng)?;
        }
        self.finish_battle(&battle)?;
        Ok(battle.state())
    }
}
