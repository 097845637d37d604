//! Quest definitions and the read-only quest catalog.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// A single quest definition. `prerequisite` is `None` for root quests
/// (the on-disk sentinel `NONE`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub quest_id: String,
    pub title: String,
    pub description: String,
    pub reward_xp: u64,
    pub reward_gold: u32,
    pub required_level: u32,
    pub prerequisite: Option<String>,
}

/// Immutable mapping of quest ID to definition, loaded once per session.
/// Iteration order is the ID order, so listings are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestCatalog {
    quests: BTreeMap<String, Quest>,
}

impl QuestCatalog {
    /// Builds a catalog without validating prerequisite links; call
    /// [`QuestCatalog::validate_prerequisites`] before handing the catalog
    /// to the ledger.
    pub fn new(quests: impl IntoIterator<Item = Quest>) -> Self {
        Self {
            quests: quests
                .into_iter()
                .map(|q| (q.quest_id.clone(), q))
                .collect(),
        }
    }

    pub fn get(&self, quest_id: &str) -> Option<&Quest> {
        self.quests.get(quest_id)
    }

    pub fn contains(&self, quest_id: &str) -> bool {
        self.quests.contains_key(quest_id)
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quest> {
        self.quests.values()
    }

    /// Checks that every referenced prerequisite exists and that the
    /// prerequisite graph is acyclic. Run at load time so the ledger can
    /// assume a well-formed catalog.
    pub fn validate_prerequisites(&self) -> Result<(), GameError> {
        for quest in self.quests.values() {
            let mut visited = HashSet::new();
            visited.insert(quest.quest_id.as_str());

            let mut current = quest.prerequisite.as_deref();
            while let Some(prereq_id) = current {
                let prereq = self
                    .quests
                    .get(prereq_id)
                    .ok_or_else(|| GameError::QuestNotFound(prereq_id.to_string()))?;
                if !visited.insert(prereq_id) {
                    return Err(GameError::CyclicPrerequisite(prereq_id.to_string()));
                }
                current = prereq.prerequisite.as_deref();
            }
        }
        Ok(())
    }
}
