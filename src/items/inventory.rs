//! Inventory, equipment, and shop operations over a character.
//!
//! The inventory is an ordered list of item IDs (duplicates allowed) capped
//! at [`MAX_INVENTORY_SIZE`]. Equipping moves an item out of the inventory
//! into its slot and applies its stat effect; unequipping reverses both.

use tracing::debug;

use crate::character::record::Character;
use crate::constants::{MAX_INVENTORY_SIZE, SELL_PRICE_DIVISOR};
use crate::error::GameError;
use crate::items::types::{Effect, Item, ItemCatalog, ItemKind, StatName};

pub fn add_item(character: &mut Character, item_id: &str) -> Result<(), GameError> {
    if character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(GameError::InventoryFull);
    }
    character.inventory.push(item_id.to_string());
    Ok(())
}

pub fn remove_item(character: &mut Character, item_id: &str) -> Result<(), GameError> {
    let position = character
        .inventory
        .iter()
        .position(|id| id == item_id)
        .ok_or_else(|| GameError::ItemNotFound(item_id.to_string()))?;
    character.inventory.remove(position);
    Ok(())
}

pub fn has_item(character: &Character, item_id: &str) -> bool {
    character.inventory.iter().any(|id| id == item_id)
}

pub fn count_item(character: &Character, item_id: &str) -> usize {
    character.inventory.iter().filter(|id| *id == item_id).count()
}

pub fn space_remaining(character: &Character) -> usize {
    MAX_INVENTORY_SIZE - character.inventory.len()
}

/// Empties the inventory, returning the removed item IDs.
pub fn clear_inventory(character: &mut Character) -> Vec<String> {
    std::mem::take(&mut character.inventory)
}

/// Consumes a consumable: applies its effect and removes it.
pub fn use_item(
    character: &mut Character,
    item_id: &str,
    catalog: &ItemCatalog,
) -> Result<Effect, GameError> {
    let item = lookup(catalog, item_id)?;
    if !has_item(character, item_id) {
        return Err(GameError::ItemNotFound(item_id.to_string()));
    }
    if item.kind != ItemKind::Consumable {
        return Err(GameError::WrongItemKind {
            id: item_id.to_string(),
            expected: ItemKind::Consumable.name(),
            actual: item.kind.name(),
        });
    }

    apply_effect(character, item.effect);
    remove_item(character, item_id)?;
    debug!(name = %character.name, item_id, "item consumed");
    Ok(item.effect)
}

pub fn equip_weapon(
    character: &mut Character,
    item_id: &str,
    catalog: &ItemCatalog,
) -> Result<(), GameError> {
    equip(character, item_id, catalog, ItemKind::Weapon)
}

pub fn equip_armor(
    character: &mut Character,
    item_id: &str,
    catalog: &ItemCatalog,
) -> Result<(), GameError> {
    equip(character, item_id, catalog, ItemKind::Armor)
}

fn equip(
    character: &mut Character,
    item_id: &str,
    catalog: &ItemCatalog,
    kind: ItemKind,
) -> Result<(), GameError> {
    let item = lookup(catalog, item_id)?;
    if !has_item(character, item_id) {
        return Err(GameError::ItemNotFound(item_id.to_string()));
    }
    if item.kind != kind {
        return Err(GameError::WrongItemKind {
            id: item_id.to_string(),
            expected: kind.name(),
            actual: item.kind.name(),
        });
    }

    // Swap out the current piece first. The returned piece needs a free
    // inventory slot, so a swap with a full inventory fails here before
    // anything has changed.
    match kind {
        ItemKind::Weapon => {
            unequip_weapon(character, catalog)?;
        }
        ItemKind::Armor => {
            unequip_armor(character, catalog)?;
        }
        ItemKind::Consumable => unreachable!("consumables are not equippable"),
    }

    apply_effect(character, item.effect);
    remove_item(character, item_id)?;
    match kind {
        ItemKind::Weapon => character.equipped_weapon = Some(item_id.to_string()),
        ItemKind::Armor => character.equipped_armor = Some(item_id.to_string()),
        ItemKind::Consumable => unreachable!(),
    }

    debug!(name = %character.name, item_id, slot = kind.name(), "item equipped");
    Ok(())
}

/// Returns the equipped weapon to the inventory, reversing its effect.
/// Returns the item ID, or `None` when no weapon is equipped.
pub fn unequip_weapon(
    character: &mut Character,
    catalog: &ItemCatalog,
) -> Result<Option<String>, GameError> {
    let Some(item_id) = character.equipped_weapon.clone() else {
        return Ok(None);
    };

    if character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(GameError::InventoryFull);
    }

    let item = lookup(catalog, &item_id)?;
    remove_effect(character, item.effect);
    character.inventory.push(item_id.clone());
    character.equipped_weapon = None;
    Ok(Some(item_id))
}

/// Returns the equipped armor to the inventory, reversing its effect.
pub fn unequip_armor(
    character: &mut Character,
    catalog: &ItemCatalog,
) -> Result<Option<String>, GameError> {
    let Some(item_id) = character.equipped_armor.clone() else {
        return Ok(None);
    };

    if character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(GameError::InventoryFull);
    }

    let item = lookup(catalog, &item_id)?;
    remove_effect(character, item.effect);
    character.inventory.push(item_id.clone());
    character.equipped_armor = None;
    Ok(Some(item_id))
}

/// Buys an item from the shop. Gold is untouched when the purchase fails.
pub fn purchase_item(
    character: &mut Character,
    item_id: &str,
    catalog: &ItemCatalog,
) -> Result<(), GameError> {
    let item = lookup(catalog, item_id)?;

    if character.gold < item.cost {
        return Err(GameError::NotEnoughGold {
            needed: item.cost,
            available: character.gold,
        });
    }
    if character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(GameError::InventoryFull);
    }

    character.spend_gold(item.cost)?;
    character.inventory.push(item_id.to_string());
    debug!(name = %character.name, item_id, cost = item.cost, "item purchased");
    Ok(())
}

/// Sells an inventory item back for half its cost. Returns the sale price.
pub fn sell_item(
    character: &mut Character,
    item_id: &str,
    catalog: &ItemCatalog,
) -> Result<u32, GameError> {
    let item = lookup(catalog, item_id)?;
    if !has_item(character, item_id) {
        return Err(GameError::ItemNotFound(item_id.to_string()));
    }

    let sell_price = item.cost / SELL_PRICE_DIVISOR;
    remove_item(character, item_id)?;
    character.add_gold(sell_price);
    debug!(name = %character.name, item_id, sell_price, "item sold");
    Ok(sell_price)
}

fn lookup<'a>(catalog: &'a ItemCatalog, item_id: &str) -> Result<&'a Item, GameError> {
    catalog
        .get(item_id)
        .ok_or_else(|| GameError::ItemNotFound(item_id.to_string()))
}

fn apply_effect(character: &mut Character, effect: Effect) {
    apply_delta(character, effect.stat, effect.amount as i64);
}

fn remove_effect(character: &mut Character, effect: Effect) {
    apply_delta(character, effect.stat, -(effect.amount as i64));
}

fn apply_delta(character: &mut Character, stat: StatName, delta: i64) {
    let target = match stat {
        StatName::Health => &mut character.health,
        StatName::MaxHealth => &mut character.max_health,
        StatName::Strength => &mut character.strength,
        StatName::Magic => &mut character.magic,
    };
    *target = (*target as i64 + delta).max(0) as u32;

    // Re-establish the health invariant after any stat change
    if character.health > character.max_health {
        character.health = character.max_health;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::class::CharacterClass;

    fn hero() -> Character {
        Character::new("Hero".to_string(), CharacterClass::Warrior, 0)
    }

    fn item(id: &str, kind: ItemKind, effect: &str, cost: u32) -> Item {
        Item {
            item_id: id.to_string(),
            name: id.to_string(),
            kind,
            effect: Effect::parse(effect).unwrap(),
            cost,
            description: String::new(),
        }
    }

    fn catalog() -> ItemCatalog {
        ItemCatalog::new([
            item("iron_sword", ItemKind::Weapon, "strength:5", 100),
            item("steel_sword", ItemKind::Weapon, "strength:9", 250),
            item("leather_armor", ItemKind::Armor, "max_health:20", 80),
            item("health_potion", ItemKind::Consumable, "health:50", 30),
        ])
    }

    #[test]
    fn test_add_and_remove() {
        let mut c = hero();
        add_item(&mut c, "health_potion").unwrap();
        add_item(&mut c, "health_potion").unwrap();
        assert_eq!(count_item(&c, "health_potion"), 2);
        assert!(has_item(&c, "health_potion"));

        remove_item(&mut c, "health_potion").unwrap();
        assert_eq!(count_item(&c, "health_potion"), 1);

        assert_eq!(
            remove_item(&mut c, "iron_sword"),
            Err(GameError::ItemNotFound("iron_sword".to_string()))
        );
    }

    #[test]
    fn test_inventory_cap() {
        let mut c = hero();
        for _ in 0..MAX_INVENTORY_SIZE {
            add_item(&mut c, "health_potion").unwrap();
        }
        assert_eq!(space_remaining(&c), 0);
        assert_eq!(add_item(&mut c, "health_potion"), Err(GameError::InventoryFull));
    }

    #[test]
    fn test_clear_inventory_returns_items() {
        let mut c = hero();
        add_item(&mut c, "iron_sword").unwrap();
        add_item(&mut c, "health_potion").unwrap();

        let removed = clear_inventory(&mut c);
        assert_eq!(removed, vec!["iron_sword", "health_potion"]);
        assert!(c.inventory.is_empty());
    }

    #[test]
    fn test_use_item_heals_with_clamp() {
        let catalog = catalog();
        let mut c = hero();
        c.take_damage(20);
        add_item(&mut c, "health_potion").unwrap();

        use_item(&mut c, "health_potion", &catalog).unwrap();
        // +50 health clamped to max_health
        assert_eq!(c.health, c.max_health);
        assert!(!has_item(&c, "health_potion"));
    }

    #[test]
    fn test_use_item_rejects_equipment() {
        let catalog = catalog();
        let mut c = hero();
        add_item(&mut c, "iron_sword").unwrap();

        let err = use_item(&mut c, "iron_sword", &catalog).unwrap_err();
        assert!(matches!(err, GameError::WrongItemKind { .. }));
        assert!(has_item(&c, "iron_sword"));
    }

    #[test]
    fn test_equip_weapon_applies_effect() {
        let catalog = catalog();
        let mut c = hero();
        add_item(&mut c, "iron_sword").unwrap();

        equip_weapon(&mut c, "iron_sword", &catalog).unwrap();
        assert_eq!(c.strength, 20);
        assert_eq!(c.equipped_weapon.as_deref(), Some("iron_sword"));
        assert!(!has_item(&c, "iron_sword"));
    }

    #[test]
    fn test_equip_swaps_previous_weapon() {
        let catalog = catalog();
        let mut c = hero();
        add_item(&mut c, "iron_sword").unwrap();
        add_item(&mut c, "steel_sword").unwrap();

        equip_weapon(&mut c, "iron_sword", &catalog).unwrap();
        equip_weapon(&mut c, "steel_sword", &catalog).unwrap();

        // Old weapon's +5 reversed, new weapon's +9 applied
        assert_eq!(c.strength, 24);
        assert_eq!(c.equipped_weapon.as_deref(), Some("steel_sword"));
        assert!(has_item(&c, "iron_sword"));
    }

    #[test]
    fn test_equip_swap_needs_room_for_old_weapon() {
        let catalog = catalog();
        let mut c = hero();
        add_item(&mut c, "iron_sword").unwrap();
        equip_weapon(&mut c, "iron_sword", &catalog).unwrap();

        add_item(&mut c, "steel_sword").unwrap();
        while space_remaining(&c) > 0 {
            add_item(&mut c, "health_potion").unwrap();
        }

        // The swapped-out sword has nowhere to go; nothing changes
        let err = equip_weapon(&mut c, "steel_sword", &catalog).unwrap_err();
        assert_eq!(err, GameError::InventoryFull);
        assert_eq!(c.equipped_weapon.as_deref(), Some("iron_sword"));
        assert_eq!(c.strength, 20);
        assert!(has_item(&c, "steel_sword"));
    }

    #[test]
    fn test_equip_rejects_wrong_kind() {
        let catalog = catalog();
        let mut c = hero();
        add_item(&mut c, "leather_armor").unwrap();

        assert!(matches!(
            equip_weapon(&mut c, "leather_armor", &catalog),
            Err(GameError::WrongItemKind { .. })
        ));
    }

    #[test]
    fn test_unequip_restores_stats_and_inventory() {
        let catalog = catalog();
        let mut c = hero();
        add_item(&mut c, "leather_armor").unwrap();

        equip_armor(&mut c, "leather_armor", &catalog).unwrap();
        assert_eq!(c.max_health, 140);

        let returned = unequip_armor(&mut c, &catalog).unwrap();
        assert_eq!(returned.as_deref(), Some("leather_armor"));
        assert_eq!(c.max_health, 120);
        // Health re-clamped to the lowered max
        assert_eq!(c.health, 120);
        assert!(has_item(&c, "leather_armor"));
    }

    #[test]
    fn test_unequip_with_full_inventory_fails() {
        let catalog = catalog();
        let mut c = hero();
        add_item(&mut c, "iron_sword").unwrap();
        equip_weapon(&mut c, "iron_sword", &catalog).unwrap();

        for _ in 0..MAX_INVENTORY_SIZE {
            add_item(&mut c, "health_potion").unwrap();
        }

        assert_eq!(
            unequip_weapon(&mut c, &catalog),
            Err(GameError::InventoryFull)
        );
        // Weapon stays equipped, stats untouched
        assert_eq!(c.equipped_weapon.as_deref(), Some("iron_sword"));
        assert_eq!(c.strength, 20);
    }

    #[test]
    fn test_purchase_deducts_gold() {
        let catalog = catalog();
        let mut c = hero();

        purchase_item(&mut c, "iron_sword", &catalog).unwrap();
        assert_eq!(c.gold, 0);
        assert!(has_item(&c, "iron_sword"));
    }

    #[test]
    fn test_purchase_insufficient_gold_changes_nothing() {
        let catalog = catalog();
        let mut c = hero();

        assert_eq!(
            purchase_item(&mut c, "steel_sword", &catalog),
            Err(GameError::NotEnoughGold {
                needed: 250,
                available: 100
            })
        );
        assert_eq!(c.gold, 100);
        assert!(c.inventory.is_empty());
    }

    #[test]
    fn test_sell_item_half_price() {
        let catalog = catalog();
        let mut c = hero();
        add_item(&mut c, "leather_armor").unwrap();

        let price = sell_item(&mut c, "leather_armor", &catalog).unwrap();
        assert_eq!(price, 40);
        assert_eq!(c.gold, 140);
        assert!(c.inventory.is_empty());
    }
}
