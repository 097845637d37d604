use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon,
    Armor,
    Consumable,
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Weapon => "weapon",
            ItemKind::Armor => "armor",
            ItemKind::Consumable => "consumable",
        }
    }

    pub fn parse(s: &str) -> Option<ItemKind> {
        match s.trim().to_lowercase().as_str() {
            "weapon" => Some(ItemKind::Weapon),
            "armor" => Some(ItemKind::Armor),
            "consumable" => Some(ItemKind::Consumable),
            _ => None,
        }
    }
}

/// The character stat an item effect touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatName {
    Health,
    MaxHealth,
    Strength,
    Magic,
}

impl StatName {
    pub fn name(&self) -> &'static str {
        match self {
            StatName::Health => "health",
            StatName::MaxHealth => "max_health",
            StatName::Strength => "strength",
            StatName::Magic => "magic",
        }
    }

    pub fn parse(s: &str) -> Option<StatName> {
        match s.trim() {
            "health" => Some(StatName::Health),
            "max_health" => Some(StatName::MaxHealth),
            "strength" => Some(StatName::Strength),
            "magic" => Some(StatName::Magic),
            _ => None,
        }
    }
}

/// A single stat delta, parsed from the `stat:value` effect notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub stat: StatName,
    pub amount: i32,
}

impl Effect {
    /// Parses `"strength:5"` / `"health:-10"` style effect strings.
    pub fn parse(s: &str) -> Result<Effect, GameError> {
        let (stat_part, amount_part) = s
            .split_once(':')
            .ok_or_else(|| GameError::InvalidDataFormat(format!("invalid effect '{}'", s)))?;

        let stat = StatName::parse(stat_part)
            .ok_or_else(|| GameError::InvalidDataFormat(format!("unknown stat '{}'", stat_part)))?;
        let amount = amount_part
            .trim()
            .parse::<i32>()
            .map_err(|_| GameError::InvalidDataFormat(format!("invalid effect value '{}'", amount_part)))?;

        Ok(Effect { stat, amount })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: String,
    pub name: String,
    pub kind: ItemKind,
    pub effect: Effect,
    pub cost: u32,
    pub description: String,
}

/// Immutable mapping of item ID to definition, loaded once per session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemCatalog {
    items: BTreeMap<String, Item>,
}

impl ItemCatalog {
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|i| (i.item_id.clone(), i))
                .collect(),
        }
    }

    pub fn get(&self, item_id: &str) -> Option<&Item> {
        self.items.get(item_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }
}
