//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads comes through `Tuning`, so
//! balance changes (detection radius, cooldowns, sizes) need no rebuild.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Edge length of one grid cell in world units
    pub tile_size: u32,
    pub gravity: f32,
    pub jump_speed: f32,
    pub run_speed: f32,

    pub bullet_speed: f32,
    pub bullet_damage: u32,

    pub player_health: u32,
    pub player_ammo: u32,
    pub player_cooldown: u32,

    pub enemy_health: u32,
    pub enemy_ammo: u32,
    pub enemy_range: f32,
    pub enemy_cooldown: u32,

    // Entity sizes (world units)
    pub player_size: Vec2,
    pub enemy_size: Vec2,
    pub item_box_size: Vec2,
    pub bullet_size: Vec2,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,
            run_speed: RUN_SPEED,

            bullet_speed: BULLET_SPEED,
            bullet_damage: BULLET_DAMAGE,

            player_health: PLAYER_HEALTH,
            player_ammo: PLAYER_AMMO,
            player_cooldown: PLAYER_COOLDOWN,

            enemy_health: ENEMY_HEALTH,
            enemy_ammo: ENEMY_AMMO,
            enemy_range: ENEMY_RANGE,
            enemy_cooldown: ENEMY_COOLDOWN,

            player_size: Vec2::new(20.0, 30.0),
            enemy_size: Vec2::new(20.0, 30.0),
            item_box_size: Vec2::new(30.0, 30.0),
            bullet_size: Vec2::new(10.0, 6.0),
        }
    }
}

impl Tuning {
    /// Tile edge as a float, for world-space maths
    #[inline]
    pub fn tile(&self) -> f32 {
        self.tile_size as f32
    }

    /// Load tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = serde_json::from_str(&json).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load tuning, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::warn!("{} not found, using default tuning", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let tuning = Tuning::default();
        assert_eq!(tuning.gravity, 0.75);
        assert_eq!(tuning.enemy_range, 200.0);
        assert_eq!(tuning.enemy_cooldown, 100);
        assert_eq!(tuning.tile(), 30.0);
    }

    #[test]
    fn test_override_detection_radius() {
        let tuning: Tuning =
            serde_json::from_str(r#"{ "enemy_range": 100.0, "enemy_cooldown": 60 }"#).unwrap();
        assert_eq!(tuning.enemy_range, 100.0);
        assert_eq!(tuning.enemy_cooldown, 60);
        assert_eq!(tuning.bullet_damage, BULLET_DAMAGE);
    }
}
