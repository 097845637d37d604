//! Item system: catalog types, inventory, equipment, and the shop.

pub mod inventory;
pub mod types;

#[allow(unused_imports)]
pub use inventory::*;
pub use types::*;
