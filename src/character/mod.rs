//! Character classes, the character record, and save-file persistence.

pub mod class;
pub mod manager;
pub mod record;

#[allow(unused_imports)]
pub use class::*;
#[allow(unused_imports)]
pub use manager::*;
#[allow(unused_imports)]
pub use record::*;
