//! Character archetypes and their base stat blocks.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
    Cleric,
}

/// Starting stats derived from a class at character creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseStats {
    pub health: u32,
    pub strength: u32,
    pub magic: u32,
}

impl CharacterClass {
    pub fn all() -> [CharacterClass; 4] {
        [
            CharacterClass::Warrior,
            CharacterClass::Mage,
            CharacterClass::Rogue,
            CharacterClass::Cleric,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Mage => "Mage",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Cleric => "Cleric",
        }
    }

    pub fn special_ability_name(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Power Strike",
            CharacterClass::Mage => "Fireball",
            CharacterClass::Rogue => "Critical Strike",
            CharacterClass::Cleric => "Divine Light",
        }
    }

    /// Parses a class name, case-insensitively.
    pub fn parse(name: &str) -> Option<CharacterClass> {
        match name.trim().to_lowercase().as_str() {
            "warrior" => Some(CharacterClass::Warrior),
            "mage" => Some(CharacterClass::Mage),
            "rogue" => Some(CharacterClass::Rogue),
            "cleric" => Some(CharacterClass::Cleric),
            _ => None,
        }
    }

    pub fn base_stats(&self) -> BaseStats {
        match self {
            CharacterClass::Warrior => BaseStats {
                health: 120,
                strength: 15,
                magic: 5,
            },
            CharacterClass::Mage => BaseStats {
                health: 80,
                strength: 8,
                magic: 20,
            },
            CharacterClass::Rogue => BaseStats {
                health: 90,
                strength: 12,
                magic: 10,
            },
            CharacterClass::Cleric => BaseStats {
                health: 100,
                strength: 10,
                magic: 15,
            },
        }
    }

    /// One-line description shown on the class picker.
    pub fn description(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "High health and strength, weak magic",
            CharacterClass::Mage => "Fragile but devastating spellcaster",
            CharacterClass::Rogue => "Quick striker with risky criticals",
            CharacterClass::Cleric => "Balanced fighter who can heal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_class_names() {
        assert_eq!(CharacterClass::parse("Warrior"), Some(CharacterClass::Warrior));
        assert_eq!(CharacterClass::parse("mage"), Some(CharacterClass::Mage));
        assert_eq!(CharacterClass::parse("  ROGUE  "), Some(CharacterClass::Rogue));
        assert_eq!(CharacterClass::parse("paladin"), None);
    }

    #[test]
    fn test_base_stats_per_class() {
        let warrior = CharacterClass::Warrior.base_stats();
        assert_eq!(warrior.health, 120);
        assert_eq!(warrior.strength, 15);
        assert_eq!(warrior.magic, 5);

        let mage = CharacterClass::Mage.base_stats();
        assert_eq!(mage.health, 80);
        assert_eq!(mage.magic, 20);
    }

    #[test]
    fn test_all_classes_listed() {
        assert_eq!(CharacterClass::all().len(), 4);
    }
}
