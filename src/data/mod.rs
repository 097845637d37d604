//! Data-file loading for the quest and item catalogs.

pub mod loader;

#[allow(unused_imports)]
pub use loader::*;
