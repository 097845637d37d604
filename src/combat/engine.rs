//! The battle state machine.
//!
//! A `Battle` owns the enemy instance and advances one round per
//! `take_turn` call: the player's chosen action resolves first, then the
//! enemy strikes back if the battle is still running. Transitions are pure
//! with respect to presentation; callers render the returned events.

use rand::Rng;
use tracing::debug;

use crate::character::class::CharacterClass;
use crate::character::record::Character;
use crate::combat::types::Enemy;
use crate::constants::{CLERIC_HEAL_AMOUNT, FLEE_CHANCE, ROGUE_CRIT_CHANCE};
use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleState {
    Active,
    PlayerWon,
    EnemyWon,
    Escaped,
}

/// The player's choice for one turn, supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    SpecialAbility,
    Flee,
}

/// One observable step of a round, in resolution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatEvent {
    PlayerAttack { damage: u32 },
    SpecialAbility { ability: &'static str, damage: u32 },
    SpecialMissed { ability: &'static str },
    Healed { amount: u32 },
    FleeSucceeded,
    FleeFailed,
    EnemyAttack { damage: u32 },
    EnemyDefeated,
    PlayerDefeated,
}

/// Rewards owed to the victor, applied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleRewards {
    pub xp: u64,
    pub gold: u32,
}

#[derive(Debug)]
pub struct Battle {
    enemy: Enemy,
    state: BattleState,
    rounds: u32,
}

impl Battle {
    /// Starts a battle session. A dead character cannot fight.
    pub fn new(character: &Character, enemy: Enemy) -> Result<Self, GameError> {
        if character.is_dead() {
            return Err(GameError::CharacterDead);
        }

        debug!(name = %character.name, enemy = %enemy.name, "battle started");
        Ok(Self {
            enemy,
            state: BattleState::Active,
            rounds: 0,
        })
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state != BattleState::Active
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// The victory rewards, available once the player has won. The engine
    /// does not apply them; the caller routes XP through the leveling rule.
    pub fn rewards(&self) -> Option<BattleRewards> {
        match self.state {
            BattleState::PlayerWon => Some(BattleRewards {
                xp: self.enemy.xp_reward,
                gold: self.enemy.gold_reward,
            }),
            _ => None,
        }
    }

    /// Runs one round: resolve the player's action, check for a terminal
    /// state, then the enemy's counterattack. Fails with `CombatNotActive`
    /// once the battle has reached any terminal state.
    pub fn take_turn(
        &mut self,
        character: &mut Character,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> Result<Vec<CombatEvent>, GameError> {
        if self.state != BattleState::Active {
            return Err(GameError::CombatNotActive);
        }

        self.rounds += 1;
        let mut events = Vec::new();

        match action {
            PlayerAction::Attack => {
                let damage = attack_damage(character.strength, self.enemy.strength);
                self.enemy.take_damage(damage);
                events.push(CombatEvent::PlayerAttack { damage });
            }
            PlayerAction::SpecialAbility => {
                self.resolve_special(character, rng, &mut events)?;
            }
            PlayerAction::Flee => {
                if rng.gen_bool(FLEE_CHANCE) {
                    self.state = BattleState::Escaped;
                    events.push(CombatEvent::FleeSucceeded);
                    debug!(enemy = %self.enemy.name, rounds = self.rounds, "fled battle");
                    return Ok(events);
                }
                // Turn is consumed, the enemy still gets to act
                events.push(CombatEvent::FleeFailed);
            }
        }

        if self.check_battle_end(character, &mut events) {
            return Ok(events);
        }

        // Enemy turn
        let damage = attack_damage(self.enemy.strength, character.strength);
        character.take_damage(damage);
        events.push(CombatEvent::EnemyAttack { damage });

        self.check_battle_end(character, &mut events);
        Ok(events)
    }

    /// Class-keyed special abilities. No cooldowns are modeled.
    fn resolve_special(
        &mut self,
        character: &mut Character,
        rng: &mut impl Rng,
        events: &mut Vec<CombatEvent>,
    ) -> Result<(), GameError> {
        match character.class {
            CharacterClass::Warrior => {
                let damage = character.strength * 2;
                self.enemy.take_damage(damage);
                events.push(CombatEvent::SpecialAbility {
                    ability: "Power Strike",
                    damage,
                });
            }
            CharacterClass::Mage => {
                let damage = character.magic * 2;
                self.enemy.take_damage(damage);
                events.push(CombatEvent::SpecialAbility {
                    ability: "Fireball",
                    damage,
                });
            }
            CharacterClass::Rogue => {
                if rng.gen_bool(ROGUE_CRIT_CHANCE) {
                    let damage = character.strength * 3;
                    self.enemy.take_damage(damage);
                    events.push(CombatEvent::SpecialAbility {
                        ability: "Critical Strike",
                        damage,
                    });
                } else {
                    events.push(CombatEvent::SpecialMissed {
                        ability: "Critical Strike",
                    });
                }
            }
            CharacterClass::Cleric => {
                let amount = character.heal(CLERIC_HEAL_AMOUNT)?;
                events.push(CombatEvent::Healed { amount });
            }
        }
        Ok(())
    }

    /// Transitions to a terminal state if either side is down. Returns true
    /// if the battle ended.
    fn check_battle_end(&mut self, character: &Character, events: &mut Vec<CombatEvent>) -> bool {
        if !self.enemy.is_alive() {
            self.state = BattleState::PlayerWon;
            events.push(CombatEvent::EnemyDefeated);
            debug!(enemy = %self.enemy.name, rounds = self.rounds, "battle won");
            return true;
        }
        if character.is_dead() {
            self.state = BattleState::EnemyWon;
            events.push(CombatEvent::PlayerDefeated);
            debug!(enemy = %self.enemy.name, rounds = self.rounds, "battle lost");
            return true;
        }
        false
    }
}

/// Basic attack damage: strength minus a quarter of the defender's
/// strength (integer division), never below 1.
pub fn attack_damage(attacker_strength: u32, defender_strength: u32) -> u32 {
    attacker_strength
        .saturating_sub(defender_strength / 4)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::types::EnemyKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn hero(class: CharacterClass) -> Character {
        Character::new("Hero".to_string(), class, 0)
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_damage_formula() {
        // 15 strength vs 8 strength: 15 - 8/4 = 13
        assert_eq!(attack_damage(15, 8), 13);
        // Floors at 1
        assert_eq!(attack_damage(1, 100), 1);
        assert_eq!(attack_damage(5, 20), 1);
        // Integer division drops the remainder
        assert_eq!(attack_damage(10, 7), 9);
    }

    #[test]
    fn test_dead_character_cannot_start_battle() {
        let mut c = hero(CharacterClass::Warrior);
        c.take_damage(500);
        assert_eq!(
            Battle::new(&c, Enemy::spawn(EnemyKind::Goblin)).err(),
            Some(GameError::CharacterDead)
        );
    }

    #[test]
    fn test_basic_attack_round() {
        let mut c = hero(CharacterClass::Warrior);
        let mut battle = Battle::new(&c, Enemy::spawn(EnemyKind::Goblin)).unwrap();

        let events = battle
            .take_turn(&mut c, PlayerAction::Attack, &mut rng())
            .unwrap();

        // Warrior 15 str vs goblin 8 str: 13 damage dealt
        assert_eq!(events[0], CombatEvent::PlayerAttack { damage: 13 });
        assert_eq!(battle.enemy().health, 37);

        // Goblin 8 str vs warrior 15 str: 8 - 3 = 5 damage back
        assert_eq!(events[1], CombatEvent::EnemyAttack { damage: 5 });
        assert_eq!(c.health, 115);
        assert_eq!(battle.state(), BattleState::Active);
    }

    #[test]
    fn test_player_wins_without_enemy_turn() {
        let mut c = hero(CharacterClass::Warrior);
        let mut battle = Battle::new(&c, Enemy::spawn(EnemyKind::Goblin)).unwrap();
        let mut rng = rng();

        // Four basic attacks at 13 damage kill the 50 HP goblin; the enemy
        // must not strike back on the killing blow.
        for _ in 0..3 {
            battle.take_turn(&mut c, PlayerAction::Attack, &mut rng).unwrap();
        }
        let health_before = c.health;
        let events = battle.take_turn(&mut c, PlayerAction::Attack, &mut rng).unwrap();

        assert_eq!(battle.state(), BattleState::PlayerWon);
        assert!(events.contains(&CombatEvent::EnemyDefeated));
        assert!(!events.iter().any(|e| matches!(e, CombatEvent::EnemyAttack { .. })));
        assert_eq!(c.health, health_before);

        let rewards = battle.rewards().unwrap();
        assert_eq!(rewards.xp, 25);
        assert_eq!(rewards.gold, 10);
    }

    #[test]
    fn test_enemy_wins_and_no_rewards() {
        let mut c = hero(CharacterClass::Mage);
        c.take_damage(79); // 1 HP left
        let mut battle = Battle::new(&c, Enemy::spawn(EnemyKind::Dragon)).unwrap();

        let events = battle
            .take_turn(&mut c, PlayerAction::Attack, &mut rng())
            .unwrap();

        assert_eq!(battle.state(), BattleState::EnemyWon);
        assert!(events.contains(&CombatEvent::PlayerDefeated));
        assert_eq!(c.health, 0);
        assert!(battle.rewards().is_none());
    }

    #[test]
    fn test_terminated_battle_rejects_actions() {
        let mut c = hero(CharacterClass::Mage);
        c.take_damage(79);
        let mut battle = Battle::new(&c, Enemy::spawn(EnemyKind::Dragon)).unwrap();
        let mut rng = rng();

        battle.take_turn(&mut c, PlayerAction::Attack, &mut rng).unwrap();
        assert!(battle.is_over());
        assert_eq!(
            battle.take_turn(&mut c, PlayerAction::Attack, &mut rng),
            Err(GameError::CombatNotActive)
        );
    }

    #[test]
    fn test_flee_eventually_escapes() {
        let mut c = hero(CharacterClass::Warrior);
        let mut battle = Battle::new(&c, Enemy::spawn(EnemyKind::Goblin)).unwrap();
        let mut rng = rng();

        // Keep fleeing; at 50% per attempt the seeded RNG escapes well
        // before the goblin can chew through 120 HP.
        while battle.state() == BattleState::Active {
            let events = battle.take_turn(&mut c, PlayerAction::Flee, &mut rng).unwrap();
            if battle.state() == BattleState::Escaped {
                // Successful flee ends the round before the enemy turn
                assert_eq!(events, vec![CombatEvent::FleeSucceeded]);
            } else {
                assert_eq!(events[0], CombatEvent::FleeFailed);
                assert!(matches!(events[1], CombatEvent::EnemyAttack { .. }));
            }
        }

        assert_eq!(battle.state(), BattleState::Escaped);
        assert!(battle.rewards().is_none());
        assert_eq!(
            battle.take_turn(&mut c, PlayerAction::Flee, &mut rng),
            Err(GameError::CombatNotActive)
        );
    }

    #[test]
    fn test_warrior_power_strike() {
        let mut c = hero(CharacterClass::Warrior);
        let mut battle = Battle::new(&c, Enemy::spawn(EnemyKind::Orc)).unwrap();

        let events = battle
            .take_turn(&mut c, PlayerAction::SpecialAbility, &mut rng())
            .unwrap();

        assert_eq!(
            events[0],
            CombatEvent::SpecialAbility {
                ability: "Power Strike",
                damage: 30,
            }
        );
        assert_eq!(battle.enemy().health, 50);
    }

    #[test]
    fn test_mage_fireball_uses_magic() {
        let mut c = hero(CharacterClass::Mage);
        let mut battle = Battle::new(&c, Enemy::spawn(EnemyKind::Orc)).unwrap();

        let events = battle
            .take_turn(&mut c, PlayerAction::SpecialAbility, &mut rng())
            .unwrap();

        assert_eq!(
            events[0],
            CombatEvent::SpecialAbility {
                ability: "Fireball",
                damage: 40,
            }
        );
    }

    #[test]
    fn test_rogue_critical_strike_distribution() {
        // Property check: over many seeded rounds the crit either deals
        // exactly strength x3 or nothing, and lands roughly half the time.
        let mut rng = rng();
        let mut hits = 0u32;
        let trials = 1000;

        for _ in 0..trials {
            let mut c = hero(CharacterClass::Rogue);
            let mut battle = Battle::new(&c, Enemy::spawn(EnemyKind::Dragon)).unwrap();
            let enemy_before = battle.enemy().health;

            let events = battle
                .take_turn(&mut c, PlayerAction::SpecialAbility, &mut rng)
                .unwrap();

            match &events[0] {
                CombatEvent::SpecialAbility { ability, damage } => {
                    assert_eq!(*ability, "Critical Strike");
                    assert_eq!(*damage, 36); // rogue strength 12 x 3
                    assert_eq!(battle.enemy().health, enemy_before - 36);
                    hits += 1;
                }
                CombatEvent::SpecialMissed { .. } => {
                    assert_eq!(battle.enemy().health, enemy_before);
                }
                other => panic!("unexpected first event: {:?}", other),
            }
        }

        // ~50% with generous slack for the fixed seed
        assert!((400..=600).contains(&hits), "hits = {}", hits);
    }

    #[test]
    fn test_cleric_heal_clamps_to_max() {
        let mut c = hero(CharacterClass::Cleric);
        c.take_damage(10);
        let mut battle = Battle::new(&c, Enemy::spawn(EnemyKind::Goblin)).unwrap();

        let events = battle
            .take_turn(&mut c, PlayerAction::SpecialAbility, &mut rng())
            .unwrap();

        // Only 10 HP were missing
        assert_eq!(events[0], CombatEvent::Healed { amount: 10 });
    }
}
