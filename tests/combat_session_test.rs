//! Combat and session integration tests
//!
//! Drives whole battles through a `GameSession` with seeded randomness and
//! checks reward application, defeat handling, and the paid revive.

use chronicles::character::class::CharacterClass;
use chronicles::character::record::Character;
use chronicles::combat::engine::{Battle, BattleState, PlayerAction};
use chronicles::combat::types::{Enemy, EnemyKind};
use chronicles::constants::REVIVE_COST;
use chronicles::error::GameError;
use chronicles::items::types::ItemCatalog;
use chronicles::quests::types::QuestCatalog;
use chronicles::session::GameSession;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn session_with(character: Character) -> GameSession {
    GameSession::new(character, QuestCatalog::default(), ItemCatalog::default())
}

fn new_warrior() -> Character {
    Character::new("Aldric".to_string(), CharacterClass::Warrior, 0)
}

#[test]
fn test_level_one_encounters_are_goblins() {
    let session = session_with(new_warrior());
    let battle = session.start_encounter().unwrap();
    assert_eq!(battle.enemy().name, "Goblin");
}

#[test]
fn test_encounters_scale_with_level() {
    let mut character = new_warrior();
    character.gain_experience(5000).unwrap();
    assert!(character.level > 5);

    let session = session_with(character);
    let battle = session.start_encounter().unwrap();
    assert_eq!(battle.enemy().name, "Dragon");
}

#[test]
fn test_won_battle_pays_out_through_the_session() {
    let mut session = session_with(new_warrior());
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let battle = session.start_encounter().unwrap();
    let state = session
        .run_battle(battle, &mut rng, |_, _| PlayerAction::Attack)
        .unwrap();

    // A fresh warrior always out-damages a goblin.
    assert_eq!(state, BattleState::PlayerWon);
    assert_eq!(session.character.experience, 25);
    assert_eq!(session.character.gold, 110);
}

#[test]
fn test_lost_battle_pays_nothing() {
    let mut character = new_warrior();
    character.take_damage(119); // 1 HP left
    let mut session = session_with(character);
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let battle = Battle::new(&session.character, Enemy::spawn(EnemyKind::Dragon)).unwrap();
    let state = session
        .run_battle(battle, &mut rng, |_, _| PlayerAction::Attack)
        .unwrap();

    assert_eq!(state, BattleState::EnemyWon);
    assert!(session.character.is_dead());
    assert_eq!(session.character.experience, 0);
    assert_eq!(session.character.gold, 100);
}

#[test]
fn test_escaped_battle_pays_nothing() {
    let mut session = session_with(new_warrior());

    // A goblin does 5 damage a round, so the warrior survives far more
    // failed flee rolls than any seed will produce.
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let battle = session.start_encounter().unwrap();
    let state = session
        .run_battle(battle, &mut rng, |_, _| PlayerAction::Flee)
        .unwrap();

    assert_eq!(state, BattleState::Escaped);
    assert_eq!(session.character.experience, 0);
    assert_eq!(session.character.gold, 100);
}

#[test]
fn test_dead_characters_cannot_start_encounters() {
    let mut character = new_warrior();
    character.take_damage(9999);
    let session = session_with(character);

    assert_eq!(session.start_encounter().unwrap_err(), GameError::CharacterDead);
}

#[test]
fn test_revive_costs_gold_and_restores_half_health() {
    let mut character = new_warrior();
    character.take_damage(9999);
    let mut session = session_with(character);

    assert!(session.can_afford_revive());
    session.revive_for_gold().unwrap();

    assert_eq!(session.character.health, 60);
    assert_eq!(session.character.gold, 100 - REVIVE_COST);
}

#[test]
fn test_revive_without_gold_fails_cleanly() {
    let mut character = new_warrior();
    character.gold = 5;
    character.take_damage(9999);
    let mut session = session_with(character);

    let err = session.revive_for_gold().unwrap_err();
    assert_eq!(
        err,
        GameError::NotEnoughGold {
            needed: REVIVE_COST,
            available: 5,
        }
    );
    assert!(session.character.is_dead());
    assert_eq!(session.character.gold, 5);
}

#[test]
fn test_cleric_outlasts_a_goblin_with_healing() {
    let character = Character::new("Mira".to_string(), CharacterClass::Cleric, 0);
    let mut session = session_with(character);
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    // Alternate heal and attack; the cleric's heal outpaces goblin damage
    // so the fight can only end in a win.
    let mut heal_next = false;
    let battle = session.start_encounter().unwrap();
    let state = session
        .run_battle(battle, &mut rng, |_, _| {
            heal_next = !heal_next;
            if heal_next {
                PlayerAction::Attack
            } else {
                PlayerAction::SpecialAbility
            }
        })
        .unwrap();

    assert_eq!(state, BattleState::PlayerWon);
    assert!(session.character.health > 0);
}
