//! Quest ledger: validates and mutates a character's quest sets against the
//! catalog, and computes prerequisite chains and completion statistics.
//!
//! No operation leaves partial state behind on failure: every precondition
//! is checked before the first mutation.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::character::record::Character;
use crate::error::GameError;
use crate::quests::types::{Quest, QuestCatalog};

/// Rewards granted by [`complete_quest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestRewards {
    pub quest_id: String,
    pub earned_xp: u64,
    pub earned_gold: u32,
    pub levels_gained: u32,
}

/// Reward totals across all completed quests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewardTotals {
    pub total_xp: u64,
    pub total_gold: u64,
}

/// Accepts a quest, adding it to the character's active set.
pub fn accept_quest(
    character: &mut Character,
    quest_id: &str,
    catalog: &QuestCatalog,
) -> Result<(), GameError> {
    let quest = catalog
        .get(quest_id)
        .ok_or_else(|| GameError::QuestNotFound(quest_id.to_string()))?;

    if character.level < quest.required_level {
        return Err(GameError::InsufficientLevel {
            id: quest_id.to_string(),
            required: quest.required_level,
            actual: character.level,
        });
    }

    if let Some(prereq) = &quest.prerequisite {
        if !character.completed_quests.contains(prereq) {
            return Err(GameError::PrerequisiteNotMet {
                id: quest_id.to_string(),
                prerequisite: prereq.clone(),
            });
        }
    }

    if character.completed_quests.contains(quest_id) {
        return Err(GameError::QuestAlreadyCompleted(quest_id.to_string()));
    }

    if character.active_quests.contains(quest_id) {
        return Err(GameError::QuestAlreadyActive(quest_id.to_string()));
    }

    character.active_quests.insert(quest_id.to_string());
    debug!(name = %character.name, quest_id, "quest accepted");
    Ok(())
}

/// Completes an active quest and grants its rewards. XP is routed through
/// the character's leveling rule, so completing a quest can level up the
/// character; a dead character cannot complete a quest.
pub fn complete_quest(
    character: &mut Character,
    quest_id: &str,
    catalog: &QuestCatalog,
) -> Result<QuestRewards, GameError> {
    let quest = catalog
        .get(quest_id)
        .ok_or_else(|| GameError::QuestNotFound(quest_id.to_string()))?;

    if !character.active_quests.contains(quest_id) {
        return Err(GameError::QuestNotActive(quest_id.to_string()));
    }

    // Checked up front so the quest sets are untouched when the XP grant
    // would be rejected.
    if character.is_dead() {
        return Err(GameError::CharacterDead);
    }

    character.active_quests.remove(quest_id);
    character.completed_quests.insert(quest_id.to_string());

    let levels_gained = character.gain_experience(quest.reward_xp)?;
    character.add_gold(quest.reward_gold);

    info!(
        name = %character.name,
        quest_id,
        xp = quest.reward_xp,
        gold = quest.reward_gold,
        "quest completed"
    );

    Ok(QuestRewards {
        quest_id: quest_id.to_string(),
        earned_xp: quest.reward_xp,
        earned_gold: quest.reward_gold,
        levels_gained,
    })
}

/// Drops a quest from the active set. No rewards, no effect on the
/// completed set.
pub fn abandon_quest(character: &mut Character, quest_id: &str) -> Result<(), GameError> {
    if !character.active_quests.remove(quest_id) {
        return Err(GameError::QuestNotActive(quest_id.to_string()));
    }
    debug!(name = %character.name, quest_id, "quest abandoned");
    Ok(())
}

/// Pure form of [`accept_quest`]: same rule set, false instead of an error,
/// never mutates.
pub fn can_accept_quest(character: &Character, quest_id: &str, catalog: &QuestCatalog) -> bool {
    let Some(quest) = catalog.get(quest_id) else {
        return false;
    };

    if character.completed_quests.contains(quest_id)
        || character.active_quests.contains(quest_id)
    {
        return false;
    }

    if character.level < quest.required_level {
        return false;
    }

    match &quest.prerequisite {
        Some(prereq) => character.completed_quests.contains(prereq),
        None => true,
    }
}

pub fn is_quest_active(character: &Character, quest_id: &str) -> bool {
    character.active_quests.contains(quest_id)
}

pub fn is_quest_completed(character: &Character, quest_id: &str) -> bool {
    character.completed_quests.contains(quest_id)
}

/// Resolves the character's active quest IDs against the catalog. IDs that
/// no longer exist in the catalog are silently skipped.
pub fn active_quests<'a>(character: &Character, catalog: &'a QuestCatalog) -> Vec<&'a Quest> {
    character
        .active_quests
        .iter()
        .filter_map(|id| catalog.get(id))
        .collect()
}

/// Resolves the character's completed quest IDs against the catalog.
pub fn completed_quests<'a>(character: &Character, catalog: &'a QuestCatalog) -> Vec<&'a Quest> {
    character
        .completed_quests
        .iter()
        .filter_map(|id| catalog.get(id))
        .collect()
}

/// Quests the character can accept right now.
pub fn available_quests<'a>(character: &Character, catalog: &'a QuestCatalog) -> Vec<&'a Quest> {
    catalog
        .iter()
        .filter(|q| can_accept_quest(character, &q.quest_id, catalog))
        .collect()
}

/// Quests whose required level falls in `[min_level, max_level]`.
pub fn quests_by_level(catalog: &QuestCatalog, min_level: u32, max_level: u32) -> Vec<&Quest> {
    catalog
        .iter()
        .filter(|q| (min_level..=max_level).contains(&q.required_level))
        .collect()
}

/// Walks prerequisite links from `quest_id` back to a root quest, returning
/// the chain ordered root-first and ending with `quest_id`.
///
/// The catalog is validated as acyclic at load time, but a revisited ID
/// still fails with `CyclicPrerequisite` instead of walking forever.
pub fn prerequisite_chain(quest_id: &str, catalog: &QuestCatalog) -> Result<Vec<String>, GameError> {
    let mut chain = Vec::new();
    let mut visited = HashSet::new();
    let mut current = quest_id.to_string();

    loop {
        let quest = catalog
            .get(&current)
            .ok_or_else(|| GameError::QuestNotFound(current.clone()))?;
        if !visited.insert(current.clone()) {
            return Err(GameError::CyclicPrerequisite(current));
        }
        chain.push(current);

        match &quest.prerequisite {
            Some(prereq) => current = prereq.clone(),
            None => break,
        }
    }

    chain.reverse();
    Ok(chain)
}

/// Percentage of the catalog the character has completed, 0 for an empty
/// catalog.
pub fn completion_percentage(character: &Character, catalog: &QuestCatalog) -> f64 {
    if catalog.is_empty() {
        return 0.0;
    }
    character.completed_quests.len() as f64 / catalog.len() as f64 * 100.0
}

/// Sums rewards over completed quests that still exist in the catalog.
pub fn total_rewards_earned(character: &Character, catalog: &QuestCatalog) -> RewardTotals {
    let mut totals = RewardTotals::default();
    for quest_id in &character.completed_quests {
        if let Some(quest) = catalog.get(quest_id) {
            totals.total_xp += quest.reward_xp;
            totals.total_gold += quest.reward_gold as u64;
        }
    }
    totals
}
