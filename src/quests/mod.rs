//! Quest catalog and the ledger that tracks a character's progress.

pub mod ledger;
pub mod types;

pub use ledger::*;
pub use types::*;
