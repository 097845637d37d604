// Progression constants
pub const XP_PER_LEVEL_STEP: u64 = 100;
pub const LEVEL_UP_MAX_HEALTH_BONUS: u32 = 10;
pub const LEVEL_UP_STRENGTH_BONUS: u32 = 2;
pub const LEVEL_UP_MAGIC_BONUS: u32 = 2;
pub const STARTING_GOLD: u32 = 100;

// Combat constants
pub const FLEE_CHANCE: f64 = 0.5;
pub const ROGUE_CRIT_CHANCE: f64 = 0.5;
pub const CLERIC_HEAL_AMOUNT: u32 = 30;
pub const REVIVE_COST: u32 = 20;

// Inventory constants
pub const MAX_INVENTORY_SIZE: usize = 20;
pub const SELL_PRICE_DIVISOR: u32 = 2;

// Save system constants
pub const SAVE_VERSION_MAGIC: u64 = 0x4348524F4E49434C; // "CHRONICL" in hex
pub const MAX_NAME_LENGTH: usize = 16;
