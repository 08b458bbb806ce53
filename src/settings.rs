//! Session and presentation settings
//!
//! Persisted as JSON next to the game data; gameplay balance lives in `tuning`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    /// Camera viewport width in pixels
    pub screen_width: u32,
    /// Camera viewport height in pixels
    pub screen_height: u32,
    /// Frame-rate limit (one simulation tick per frame)
    pub fps: u32,
    /// Background colour behind the level
    pub background: [u8; 3],

    // === Levels ===
    /// Directory holding `level{n}_data.csv` files
    pub level_dir: PathBuf,
    /// Declared grid height of every level
    pub rows: usize,
    /// Declared grid width of every level
    pub cols: usize,
    /// Level the session starts on (1-based)
    pub start_level: u32,
    /// Last level; completing it finishes the session
    pub max_levels: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            fps: FPS,
            background: BG,

            level_dir: PathBuf::from("world_data"),
            rows: ROWS,
            cols: COLS,
            start_level: 1,
            max_levels: MAX_LEVELS,
        }
    }
}

impl Settings {
    /// Path of the grid resource for a level number
    pub fn level_path(&self, level_no: u32) -> PathBuf {
        self.level_dir.join(format!("level{level_no}_data.csv"))
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&json).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::warn!("{} not found, using default settings", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }
}
