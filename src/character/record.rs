//! The persistent character record and its stat-mutating operations.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::character::class::CharacterClass;
use crate::constants::{
    LEVEL_UP_MAGIC_BONUS, LEVEL_UP_MAX_HEALTH_BONUS, LEVEL_UP_STRENGTH_BONUS, STARTING_GOLD,
    XP_PER_LEVEL_STEP,
};
use crate::error::GameError;

/// A player character. All mutation goes through methods that uphold the
/// record's invariants: health never exceeds max_health, gold never goes
/// negative, and the active and completed quest sets stay disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub strength: u32,
    pub magic: u32,
    pub experience: u64,
    pub gold: u32,
    pub inventory: Vec<String>,
    pub active_quests: BTreeSet<String>,
    pub completed_quests: BTreeSet<String>,
    pub equipped_weapon: Option<String>,
    pub equipped_armor: Option<String>,
    pub created_at: i64,
    pub last_saved: i64,
}

impl Character {
    /// Creates a level-1 character with class-derived base stats.
    pub fn new(name: String, class: CharacterClass, current_time: i64) -> Self {
        let base = class.base_stats();

        Self {
            id: Uuid::new_v4().to_string(),
            name,
            class,
            level: 1,
            health: base.health,
            max_health: base.health,
            strength: base.strength,
            magic: base.magic,
            experience: 0,
            gold: STARTING_GOLD,
            inventory: Vec::new(),
            active_quests: BTreeSet::new(),
            completed_quests: BTreeSet::new(),
            equipped_weapon: None,
            equipped_armor: None,
            created_at: current_time,
            last_saved: current_time,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// XP still needed to reach the next level.
    pub fn xp_to_next_level(&self) -> u64 {
        let threshold = self.level as u64 * XP_PER_LEVEL_STEP;
        threshold.saturating_sub(self.experience)
    }

    /// Grants experience and processes level-ups. The loop handles multiple
    /// levels from a single grant; each level-up raises max health and both
    /// attack stats and fully restores health.
    ///
    /// Fails with `CharacterDead` if the character's health is 0 - a dead
    /// character cannot gain experience. Returns the number of levels gained.
    pub fn gain_experience(&mut self, xp_amount: u64) -> Result<u32, GameError> {
        if self.is_dead() {
            return Err(GameError::CharacterDead);
        }

        self.experience += xp_amount;

        let mut levels_gained = 0;
        while self.experience >= self.level as u64 * XP_PER_LEVEL_STEP {
            self.experience -= self.level as u64 * XP_PER_LEVEL_STEP;
            self.level += 1;
            self.max_health += LEVEL_UP_MAX_HEALTH_BONUS;
            self.strength += LEVEL_UP_STRENGTH_BONUS;
            self.magic += LEVEL_UP_MAGIC_BONUS;
            self.health = self.max_health;
            levels_gained += 1;
        }

        if levels_gained > 0 {
            debug!(
                name = %self.name,
                level = self.level,
                levels_gained,
                "character leveled up"
            );
        }

        Ok(levels_gained)
    }

    pub fn add_gold(&mut self, amount: u32) -> u32 {
        self.gold = self.gold.saturating_add(amount);
        self.gold
    }

    /// Removes gold, failing with `NotEnoughGold` (and leaving the balance
    /// untouched) if the character cannot afford it.
    pub fn spend_gold(&mut self, amount: u32) -> Result<u32, GameError> {
        if amount > self.gold {
            return Err(GameError::NotEnoughGold {
                needed: amount,
                available: self.gold,
            });
        }
        self.gold -= amount;
        Ok(self.gold)
    }

    /// Heals up to `amount`, clamped at max health. Returns the amount
    /// actually restored. A dead character cannot be healed.
    pub fn heal(&mut self, amount: u32) -> Result<u32, GameError> {
        if self.is_dead() {
            return Err(GameError::CharacterDead);
        }
        let before = self.health;
        self.health = (self.health + amount).min(self.max_health);
        Ok(self.health - before)
    }

    /// Applies damage, clamping health at 0.
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Revives a dead character at half max health. Returns false if the
    /// character was not dead.
    pub fn revive(&mut self) -> bool {
        if !self.is_dead() {
            return false;
        }
        self.health = self.max_health / 2;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warrior() -> Character {
        Character::new("Test Hero".to_string(), CharacterClass::Warrior, 0)
    }

    #[test]
    fn test_new_character_base_stats() {
        let c = warrior();
        assert_eq!(c.level, 1);
        assert_eq!(c.health, 120);
        assert_eq!(c.max_health, 120);
        assert_eq!(c.strength, 15);
        assert_eq!(c.magic, 5);
        assert_eq!(c.experience, 0);
        assert_eq!(c.gold, STARTING_GOLD);
        assert!(c.inventory.is_empty());
        assert!(c.active_quests.is_empty());
        assert!(c.completed_quests.is_empty());
        assert!(c.equipped_weapon.is_none());
        assert!(c.equipped_armor.is_none());
    }

    #[test]
    fn test_gain_experience_single_level() {
        let mut c = warrior();
        c.take_damage(50);

        let levels = c.gain_experience(100).unwrap();
        assert_eq!(levels, 1);
        assert_eq!(c.level, 2);
        assert_eq!(c.experience, 0);
        assert_eq!(c.max_health, 130);
        assert_eq!(c.strength, 17);
        assert_eq!(c.magic, 7);
        // Level-up fully restores health
        assert_eq!(c.health, 130);
    }

    #[test]
    fn test_gain_experience_multi_level() {
        let mut c = warrior();
        // 100 (level 1) + 200 (level 2) + 50 leftover
        let levels = c.gain_experience(350).unwrap();
        assert_eq!(levels, 2);
        assert_eq!(c.level, 3);
        assert_eq!(c.experience, 50);
        assert_eq!(c.max_health, 140);
    }

    #[test]
    fn test_gain_experience_below_threshold() {
        let mut c = warrior();
        let levels = c.gain_experience(99).unwrap();
        assert_eq!(levels, 0);
        assert_eq!(c.level, 1);
        assert_eq!(c.experience, 99);
    }

    #[test]
    fn test_dead_character_cannot_gain_experience() {
        let mut c = warrior();
        c.take_damage(500);
        assert!(c.is_dead());
        assert_eq!(c.gain_experience(100), Err(GameError::CharacterDead));
        assert_eq!(c.experience, 0);
    }

    #[test]
    fn test_spend_gold_insufficient() {
        let mut c = warrior();
        let err = c.spend_gold(101).unwrap_err();
        assert_eq!(
            err,
            GameError::NotEnoughGold {
                needed: 101,
                available: 100
            }
        );
        // Gold unchanged on failure
        assert_eq!(c.gold, 100);

        c.spend_gold(100).unwrap();
        assert_eq!(c.gold, 0);
    }

    #[test]
    fn test_add_gold_saturates() {
        let mut c = warrior();
        c.gold = u32::MAX - 10;
        assert_eq!(c.add_gold(100), u32::MAX);
        assert_eq!(c.gold, u32::MAX);
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let mut c = warrior();
        c.take_damage(10);
        assert_eq!(c.heal(50).unwrap(), 10);
        assert_eq!(c.health, c.max_health);
    }

    #[test]
    fn test_heal_dead_character_fails() {
        let mut c = warrior();
        c.take_damage(200);
        assert_eq!(c.heal(30), Err(GameError::CharacterDead));
    }

    #[test]
    fn test_revive_at_half_health() {
        let mut c = warrior();
        assert!(!c.revive());

        c.take_damage(200);
        assert!(c.revive());
        assert_eq!(c.health, 60);
    }

    #[test]
    fn test_take_damage_no_underflow() {
        let mut c = warrior();
        c.take_damage(10_000);
        assert_eq!(c.health, 0);
    }
}
