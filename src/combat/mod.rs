//! Turn-based combat: enemy templates and the battle state machine.

pub mod engine;
pub mod types;

pub use engine::*;
#[allow(unused_imports)]
pub use types::*;
