//! Domain errors for every fallible game operation.
//!
//! Errors are categorized rather than numeric: `ErrorCategory` groups the
//! variants into the classes the orchestrator cares about when deciding how
//! to present a failure. All failures are synchronous and leave the mutated
//! entity in its pre-call state.

use thiserror::Error;

/// Broad classification of a [`GameError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A quest, item, or character the caller named does not exist.
    NotFound,
    /// The operation is valid but its preconditions are not met.
    PreconditionViolation,
    /// The operation was requested in a state that cannot service it.
    InvalidState,
    /// Persisted or catalog data failed validation.
    DataCorruption,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    // Quest errors
    #[error("quest '{0}' not found")]
    QuestNotFound(String),
    #[error("quest '{id}' requires level {required}, character is level {actual}")]
    InsufficientLevel {
        id: String,
        required: u32,
        actual: u32,
    },
    #[error("prerequisite quest '{prerequisite}' for '{id}' not completed")]
    PrerequisiteNotMet { id: String, prerequisite: String },
    #[error("quest '{0}' already completed")]
    QuestAlreadyCompleted(String),
    #[error("quest '{0}' already active")]
    QuestAlreadyActive(String),
    #[error("quest '{0}' is not active")]
    QuestNotActive(String),
    #[error("prerequisite cycle detected at quest '{0}'")]
    CyclicPrerequisite(String),

    // Combat errors
    #[error("character is dead")]
    CharacterDead,
    #[error("battle is already over")]
    CombatNotActive,

    // Inventory and shop errors
    #[error("item '{0}' not found")]
    ItemNotFound(String),
    #[error("item '{id}' is {actual}, expected {expected}")]
    WrongItemKind {
        id: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("inventory is full")]
    InventoryFull,
    #[error("not enough gold: need {needed}, have {available}")]
    NotEnoughGold { needed: u32, available: u32 },

    // Persistence errors
    #[error("no saved character named '{0}'")]
    CharacterNotFound(String),
    #[error("save data is invalid: {0}")]
    InvalidSaveData(String),
    #[error("invalid character name: {0}")]
    InvalidName(String),
    #[error("i/o error: {0}")]
    Io(String),

    // Catalog errors
    #[error("data file '{0}' is missing")]
    MissingDataFile(String),
    #[error("invalid data format: {0}")]
    InvalidDataFormat(String),
    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

impl GameError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GameError::QuestNotFound(_)
            | GameError::ItemNotFound(_)
            | GameError::CharacterNotFound(_) => ErrorCategory::NotFound,

            GameError::InsufficientLevel { .. }
            | GameError::PrerequisiteNotMet { .. }
            | GameError::QuestAlreadyCompleted(_)
            | GameError::QuestAlreadyActive(_)
            | GameError::QuestNotActive(_)
            | GameError::CharacterDead
            | GameError::WrongItemKind { .. }
            | GameError::InventoryFull
            | GameError::NotEnoughGold { .. }
            | GameError::InvalidName(_) => ErrorCategory::PreconditionViolation,

            GameError::CombatNotActive => ErrorCategory::InvalidState,

            GameError::CyclicPrerequisite(_)
            | GameError::InvalidSaveData(_)
            | GameError::MissingDataFile(_)
            | GameError::InvalidDataFormat(_)
            | GameError::CorruptedData(_)
            | GameError::Io(_) => ErrorCategory::DataCorruption,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e.to_string())
    }
}
