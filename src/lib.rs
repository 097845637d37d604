//! Chronicles - Terminal-Based Turn-Based RPG Library
//!
//! This module exposes the game logic for testing and external use.

// Allow dead code in library - some functions are only used by the binary
#![allow(dead_code)]

pub mod character;
pub mod combat;
pub mod constants;
pub mod data;
pub mod error;
pub mod items;
pub mod quests;
pub mod session;

pub use character::record::Character;
pub use error::{ErrorCategory, GameError};
pub use session::GameSession;

// UI module is not exposed as it's tightly coupled to the terminal
mod ui;
