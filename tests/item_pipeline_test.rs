//! Item pipeline integration tests
//!
//! Buys, equips, uses, and sells items from the starter catalog against a
//! live character, checking gold and stat bookkeeping at each step.

use chronicles::character::class::CharacterClass;
use chronicles::character::record::Character;
use chronicles::constants::MAX_INVENTORY_SIZE;
use chronicles::data::loader::{create_default_data_files, load_items};
use chronicles::error::GameError;
use chronicles::items::inventory;
use chronicles::items::types::ItemCatalog;

fn starter_items() -> ItemCatalog {
    let dir = tempfile::tempdir().unwrap();
    create_default_data_files(dir.path()).unwrap();
    load_items(&dir.path().join("items.txt")).unwrap()
}

fn new_warrior() -> Character {
    Character::new("Aldric".to_string(), CharacterClass::Warrior, 0)
}

#[test]
fn test_buy_equip_fight_ready() {
    let items = starter_items();
    let mut character = new_warrior();

    inventory::purchase_item(&mut character, "basic_sword", &items).unwrap();
    assert_eq!(character.gold, 0); // sword costs the full starting 100

    inventory::equip_weapon(&mut character, "basic_sword", &items).unwrap();
    assert_eq!(character.strength, 20); // 15 base + 5 from the sword
    assert!(character.inventory.is_empty());
    assert_eq!(character.equipped_weapon.as_deref(), Some("basic_sword"));
}

#[test]
fn test_unequip_reverses_the_bonus() {
    let items = starter_items();
    let mut character = new_warrior();

    inventory::purchase_item(&mut character, "basic_sword", &items).unwrap();
    inventory::equip_weapon(&mut character, "basic_sword", &items).unwrap();

    let returned = inventory::unequip_weapon(&mut character, &items).unwrap();
    assert_eq!(returned.as_deref(), Some("basic_sword"));
    assert_eq!(character.strength, 15);
    assert_eq!(character.inventory, vec!["basic_sword".to_string()]);
}

#[test]
fn test_armor_raises_max_health_and_sell_recovers_half() {
    let items = starter_items();
    let mut character = new_warrior();

    inventory::purchase_item(&mut character, "leather_armor", &items).unwrap();
    assert_eq!(character.gold, 20);

    inventory::equip_armor(&mut character, "leather_armor", &items).unwrap();
    assert_eq!(character.max_health, 140);

    inventory::unequip_armor(&mut character, &items).unwrap();
    assert_eq!(character.max_health, 120);

    let price = inventory::sell_item(&mut character, "leather_armor", &items).unwrap();
    assert_eq!(price, 40);
    assert_eq!(character.gold, 60);
    assert!(character.inventory.is_empty());
}

#[test]
fn test_potion_heals_and_is_consumed() {
    let items = starter_items();
    let mut character = new_warrior();
    character.take_damage(80);

    inventory::purchase_item(&mut character, "health_potion", &items).unwrap();
    let effect = inventory::use_item(&mut character, "health_potion", &items).unwrap();
    assert_eq!(effect.amount, 50);

    assert_eq!(character.health, 90); // 40 + 50
    assert!(!inventory::has_item(&character, "health_potion"));
}

#[test]
fn test_potion_never_overheals() {
    let items = starter_items();
    let mut character = new_warrior();
    character.take_damage(10);

    inventory::purchase_item(&mut character, "health_potion", &items).unwrap();
    inventory::use_item(&mut character, "health_potion", &items).unwrap();
    assert_eq!(character.health, character.max_health);
}

#[test]
fn test_cannot_equip_a_consumable() {
    let items = starter_items();
    let mut character = new_warrior();

    inventory::purchase_item(&mut character, "health_potion", &items).unwrap();
    let err = inventory::equip_weapon(&mut character, "health_potion", &items).unwrap_err();
    assert_eq!(
        err,
        GameError::WrongItemKind {
            id: "health_potion".to_string(),
            expected: "weapon",
            actual: "consumable",
        }
    );
    // Still in the bag, nothing was applied.
    assert!(inventory::has_item(&character, "health_potion"));
    assert_eq!(character.strength, 15);
}

#[test]
fn test_purchase_fails_before_touching_gold() {
    let items = starter_items();
    let mut character = new_warrior();

    // mana_crystal costs 150, the fresh character has 100.
    let err = inventory::purchase_item(&mut character, "mana_crystal", &items).unwrap_err();
    assert_eq!(
        err,
        GameError::NotEnoughGold {
            needed: 150,
            available: 100,
        }
    );
    assert_eq!(character.gold, 100);
    assert!(character.inventory.is_empty());
}

#[test]
fn test_full_inventory_blocks_purchases() {
    let items = starter_items();
    let mut character = new_warrior();
    character.gold = 10_000;

    for _ in 0..MAX_INVENTORY_SIZE {
        inventory::purchase_item(&mut character, "health_potion", &items).unwrap();
    }

    let gold_before = character.gold;
    let err = inventory::purchase_item(&mut character, "health_potion", &items).unwrap_err();
    assert_eq!(err, GameError::InventoryFull);
    assert_eq!(character.gold, gold_before);
    assert_eq!(character.inventory.len(), MAX_INVENTORY_SIZE);
}
