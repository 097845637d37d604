//! Terminal screens. Each screen owns its cursor/input state and draws
//! itself into a frame; key handling lives in the main event loop.

pub mod battle_screen;
pub mod character_create;
pub mod character_select;
pub mod game_menu;
pub mod inventory_screen;
pub mod quest_screen;
pub mod shop_screen;

// Re-exports are consumed by the binary's module tree; the library keeps
// `ui` private, so they appear unused when compiling the lib target.
#[allow(unused_imports)]
pub use battle_screen::BattleScreen;
#[allow(unused_imports)]
pub use character_create::CharacterCreationScreen;
#[allow(unused_imports)]
pub use character_select::CharacterSelectScreen;
#[allow(unused_imports)]
pub use game_menu::{GameMenuScreen, MenuEntry};
#[allow(unused_imports)]
pub use inventory_screen::InventoryScreen;
#[allow(unused_imports)]
pub use quest_screen::{QuestScreen, QuestTab};
#[allow(unused_imports)]
pub use shop_screen::ShopScreen;
