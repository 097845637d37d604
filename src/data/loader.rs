//! Loading and validating the quest and item catalogs from data files.
//!
//! Catalog files are plain text: one record per block, blocks separated by
//! blank lines, each line a `KEY: value` pair. All validation happens here,
//! before the catalogs reach the ledger or the shop.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::GameError;
use crate::items::types::{Effect, Item, ItemCatalog, ItemKind};
use crate::quests::types::{Quest, QuestCatalog};

/// The prerequisite value meaning "no prerequisite required".
pub const NO_PREREQUISITE: &str = "NONE";

/// Loads the quest catalog, verifying fields and prerequisite consistency.
pub fn load_quests(path: &Path) -> Result<QuestCatalog, GameError> {
    let content = read_data_file(path)?;

    let mut quests = Vec::new();
    for block in blocks(&content) {
        quests.push(parse_quest_block(&block)?);
    }

    let catalog = QuestCatalog::new(quests);
    catalog.validate_prerequisites()?;
    info!(path = %path.display(), count = catalog.len(), "quest catalog loaded");
    Ok(catalog)
}

/// Loads the item catalog.
pub fn load_items(path: &Path) -> Result<ItemCatalog, GameError> {
    let content = read_data_file(path)?;

    let mut items = Vec::new();
    for block in blocks(&content) {
        items.push(parse_item_block(&block)?);
    }

    let catalog = ItemCatalog::new(items);
    info!(path = %path.display(), count = catalog.len(), "item catalog loaded");
    Ok(catalog)
}

fn read_data_file(path: &Path) -> Result<String, GameError> {
    if !path.exists() {
        return Err(GameError::MissingDataFile(path.display().to_string()));
    }
    fs::read_to_string(path).map_err(|e| GameError::CorruptedData(e.to_string()))
}

/// Splits file content into blocks of trimmed, non-empty lines.
fn blocks(content: &str) -> Vec<Vec<&str>> {
    let mut result = Vec::new();
    let mut current = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                result.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        result.push(current);
    }
    result
}

fn split_field<'a>(line: &'a str) -> Result<(&'a str, &'a str), GameError> {
    let (key, value) = line
        .split_once(':')
        .ok_or_else(|| GameError::InvalidDataFormat(format!("bad line format: '{}'", line)))?;
    Ok((key.trim(), value.trim()))
}

fn parse_int<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, GameError> {
    value
        .parse::<T>()
        .map_err(|_| GameError::InvalidDataFormat(format!("{} must be a non-negative integer", key)))
}

fn parse_quest_block(lines: &[&str]) -> Result<Quest, GameError> {
    let mut quest_id = None;
    let mut title = None;
    let mut description = None;
    let mut reward_xp = None;
    let mut reward_gold = None;
    let mut required_level = None;
    let mut prerequisite = None;

    for line in lines {
        let (key, value) = split_field(line)?;
        match key {
            "QUEST_ID" => quest_id = Some(value.to_string()),
            "TITLE" => title = Some(value.to_string()),
            "DESCRIPTION" => description = Some(value.to_string()),
            "REWARD_XP" => reward_xp = Some(parse_int::<u64>(key, value)?),
            "REWARD_GOLD" => reward_gold = Some(parse_int::<u32>(key, value)?),
            "REQUIRED_LEVEL" => required_level = Some(parse_int::<u32>(key, value)?),
            "PREREQUISITE" => {
                prerequisite = Some(if value.eq_ignore_ascii_case(NO_PREREQUISITE) {
                    None
                } else {
                    Some(value.to_string())
                })
            }
            other => {
                return Err(GameError::InvalidDataFormat(format!(
                    "unknown quest field: {}",
                    other
                )))
            }
        }
    }

    let missing = |field: &str| GameError::InvalidDataFormat(format!("missing quest field: {}", field));
    let required_level =
        required_level.ok_or_else(|| missing("REQUIRED_LEVEL"))?;
    if required_level == 0 {
        return Err(GameError::InvalidDataFormat(
            "REQUIRED_LEVEL must be at least 1".to_string(),
        ));
    }

    Ok(Quest {
        quest_id: quest_id.ok_or_else(|| missing("QUEST_ID"))?,
        title: title.ok_or_else(|| missing("TITLE"))?,
        description: description.ok_or_else(|| missing("DESCRIPTION"))?,
        reward_xp: reward_xp.ok_or_else(|| missing("REWARD_XP"))?,
        reward_gold: reward_gold.ok_or_else(|| missing("REWARD_GOLD"))?,
        required_level,
        prerequisite: prerequisite.ok_or_else(|| missing("PREREQUISITE"))?,
    })
}

fn parse_item_block(lines: &[&str]) -> Result<Item, GameError> {
    let mut item_id = None;
    let mut name = None;
    let mut kind = None;
    let mut effect = None;
    let mut cost = None;
    let mut description = None;

    for line in lines {
        let (key, value) = split_field(line)?;
        match key {
            "ITEM_ID" => item_id = Some(value.to_string()),
            "NAME" => name = Some(value.to_string()),
            "TYPE" => {
                kind = Some(ItemKind::parse(value).ok_or_else(|| {
                    GameError::InvalidDataFormat(format!("invalid item type: {}", value))
                })?)
            }
            "EFFECT" => effect = Some(Effect::parse(value)?),
            "COST" => cost = Some(parse_int::<u32>(key, value)?),
            "DESCRIPTION" => description = Some(value.to_string()),
            other => {
                return Err(GameError::InvalidDataFormat(format!(
                    "unknown item field: {}",
                    other
                )))
            }
        }
    }

    let missing = |field: &str| GameError::InvalidDataFormat(format!("missing item field: {}", field));
    Ok(Item {
        item_id: item_id.ok_or_else(|| missing("ITEM_ID"))?,
        name: name.ok_or_else(|| missing("NAME"))?,
        kind: kind.ok_or_else(|| missing("TYPE"))?,
        effect: effect.ok_or_else(|| missing("EFFECT"))?,
        cost: cost.ok_or_else(|| missing("COST"))?,
        description: description.ok_or_else(|| missing("DESCRIPTION"))?,
    })
}

const DEFAULT_QUESTS: &str = "\
QUEST_ID: intro_1
TITLE: The Beginning
DESCRIPTION: Your adventure starts here.
REWARD_XP: 50
REWARD_GOLD: 20
REQUIRED_LEVEL: 1
PREREQUISITE: NONE

QUEST_ID: goblin_hunt
TITLE: Goblin Hunt
DESCRIPTION: Drive the goblins from the village fields.
REWARD_XP: 100
REWARD_GOLD: 50
REQUIRED_LEVEL: 1
PREREQUISITE: intro_1

QUEST_ID: orc_warlord
TITLE: The Orc Warlord
DESCRIPTION: Defeat the warlord who commands the raiders.
REWARD_XP: 250
REWARD_GOLD: 120
REQUIRED_LEVEL: 3
PREREQUISITE: goblin_hunt

QUEST_ID: dragons_lair
TITLE: The Dragon's Lair
DESCRIPTION: Face the dragon beneath the mountain.
REWARD_XP: 600
REWARD_GOLD: 400
REQUIRED_LEVEL: 6
PREREQUISITE: orc_warlord
";

const DEFAULT_ITEMS: &str = "\
ITEM_ID: basic_sword
NAME: Basic Sword
TYPE: weapon
EFFECT: strength:5
COST: 100
DESCRIPTION: A simple beginner sword.

ITEM_ID: leather_armor
NAME: Leather Armor
TYPE: armor
EFFECT: max_health:20
COST: 80
DESCRIPTION: Sturdy boiled leather.

ITEM_ID: health_potion
NAME: Health Potion
TYPE: consumable
EFFECT: health:50
COST: 30
DESCRIPTION: Restores 50 health when consumed.

ITEM_ID: mana_crystal
NAME: Mana Crystal
TYPE: consumable
EFFECT: magic:2
COST: 150
DESCRIPTION: Permanently sharpens magical focus.
";

/// Writes starter catalogs into `dir` for any data file that is missing.
pub fn create_default_data_files(dir: &Path) -> Result<(), GameError> {
    fs::create_dir_all(dir)?;

    let quests_path = dir.join("quests.txt");
    if !quests_path.exists() {
        fs::write(&quests_path, DEFAULT_QUESTS)?;
        info!(path = %quests_path.display(), "default quest data written");
    }

    let items_path = dir.join("items.txt");
    if !items_path.exists() {
        fs::write(&items_path, DEFAULT_ITEMS)?;
        info!(path = %items_path.display(), "default item data written");
    }

    Ok(())
}
