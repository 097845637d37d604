//! Character persistence: checksummed save files, one per character.
//!
//! File format:
//! - Version magic (8 bytes)
//! - Data length (4 bytes)
//! - Bincode-serialized character record (variable length)
//! - SHA256 checksum over the preceding bytes (32 bytes)

use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::character::record::Character;
use crate::constants::{MAX_NAME_LENGTH, SAVE_VERSION_MAGIC};
use crate::error::GameError;

/// Summary row for the character select screen. Corrupted save files are
/// listed rather than hidden so the player can delete them.
#[derive(Debug, Clone)]
pub struct CharacterInfo {
    pub name: String,
    pub class_name: String,
    pub level: u32,
    pub filename: String,
    pub last_saved: i64,
    pub is_corrupted: bool,
}

pub struct CharacterManager {
    save_dir: PathBuf,
}

impl CharacterManager {
    /// Creates a manager rooted at the platform save directory.
    pub fn new() -> Result<Self, GameError> {
        let project_dirs = ProjectDirs::from("", "", "chronicles").ok_or_else(|| {
            GameError::Io("could not determine platform data directory".to_string())
        })?;

        Self::with_dir(project_dirs.data_dir().join("saves"))
    }

    /// Creates a manager rooted at an explicit directory. Tests point this
    /// at a temporary directory.
    pub fn with_dir(save_dir: PathBuf) -> Result<Self, GameError> {
        fs::create_dir_all(&save_dir)?;
        Ok(Self { save_dir })
    }

    pub fn save(&self, character: &Character) -> Result<(), GameError> {
        let data = bincode::serialize(character)
            .map_err(|e| GameError::InvalidSaveData(e.to_string()))?;
        let data_len = data.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let filepath = self.save_dir.join(save_filename(&character.name));
        let mut file = fs::File::create(&filepath)?;
        file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;

        debug!(name = %character.name, path = %filepath.display(), "character saved");
        Ok(())
    }

    /// Loads a character by name. Fails with `CharacterNotFound` if no save
    /// file exists and `InvalidSaveData` if the file fails validation.
    pub fn load(&self, name: &str) -> Result<Character, GameError> {
        let filepath = self.save_dir.join(save_filename(name));
        if !filepath.exists() {
            return Err(GameError::CharacterNotFound(name.to_string()));
        }
        self.load_file(&save_filename(name))
    }

    /// Loads a character from a file name inside the save directory.
    pub fn load_file(&self, filename: &str) -> Result<Character, GameError> {
        let filepath = self.save_dir.join(filename);
        let mut file = fs::File::open(&filepath)?;

        let mut magic_bytes = [0u8; 8];
        file.read_exact(&mut magic_bytes)
            .map_err(|_| GameError::InvalidSaveData("file truncated".to_string()))?;
        if u64::from_le_bytes(magic_bytes) != SAVE_VERSION_MAGIC {
            return Err(GameError::InvalidSaveData(
                "unrecognized save file header".to_string(),
            ));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)
            .map_err(|_| GameError::InvalidSaveData("file truncated".to_string()))?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)
            .map_err(|_| GameError::InvalidSaveData("file truncated".to_string()))?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)
            .map_err(|_| GameError::InvalidSaveData("missing checksum".to_string()))?;

        let mut hasher = Sha256::new();
        hasher.update(magic_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        if hasher.finalize().as_slice() != stored_checksum {
            return Err(GameError::InvalidSaveData(
                "checksum mismatch".to_string(),
            ));
        }

        bincode::deserialize(&data).map_err(|e| GameError::InvalidSaveData(e.to_string()))
    }

    /// Lists saved characters, most recently saved first.
    pub fn list(&self) -> Result<Vec<CharacterInfo>, GameError> {
        let mut characters = Vec::new();

        for entry in fs::read_dir(&self.save_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("save") {
                continue;
            }

            let filename = path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("")
                .to_string();

            match self.load_file(&filename) {
                Ok(character) => characters.push(CharacterInfo {
                    name: character.name.clone(),
                    class_name: character.class.name().to_string(),
                    level: character.level,
                    filename,
                    last_saved: character.last_saved,
                    is_corrupted: false,
                }),
                Err(e) => {
                    warn!(filename = %filename, error = %e, "skipping unreadable save file");
                    characters.push(CharacterInfo {
                        name: "[CORRUPTED]".to_string(),
                        class_name: String::new(),
                        level: 0,
                        filename,
                        last_saved: 0,
                        is_corrupted: true,
                    });
                }
            }
        }

        characters.sort_by(|a, b| b.last_saved.cmp(&a.last_saved));
        Ok(characters)
    }

    pub fn delete(&self, filename: &str) -> Result<(), GameError> {
        fs::remove_file(self.save_dir.join(filename))?;
        Ok(())
    }

    /// Renames a character: validates the new name, rewrites the record under
    /// it, and removes the old save file.
    pub fn rename(&self, old_filename: &str, new_name: &str) -> Result<(), GameError> {
        validate_name(new_name)?;

        let mut character = self.load_file(old_filename)?;
        character.name = new_name.trim().to_string();
        self.save(&character)?;

        // Names that sanitize to the same stem reuse the file just written
        if save_filename(&character.name) != old_filename {
            fs::remove_file(self.save_dir.join(old_filename))?;
        }
        Ok(())
    }
}

fn save_filename(name: &str) -> String {
    format!("{}.save", sanitize_name(name))
}

/// Validates a character name for creation: non-empty after trimming, at
/// most 16 characters, letters/digits/spaces/hyphens/underscores only.
pub fn validate_name(name: &str) -> Result<(), GameError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(GameError::InvalidName("name cannot be empty".to_string()));
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(GameError::InvalidName(format!(
            "name must be {} characters or less",
            MAX_NAME_LENGTH
        )));
    }

    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_');
    if !valid_chars {
        return Err(GameError::InvalidName(
            "name can only contain letters, numbers, spaces, hyphens, and underscores".to_string(),
        ));
    }

    Ok(())
}

/// Reduces a display name to a filesystem-safe save-file stem.
pub fn sanitize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}
