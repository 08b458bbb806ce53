//! Tile Shooter - a 2D side-scrolling platform shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid loading, entities, physics, combat)
//! - `camera`: Viewport that follows the player and clips to the world
//! - `renderer`: Software surfaces and per-tick render snapshots
//! - `platform`: Input events and frame-rate limiting
//! - `assets`: Asset identity keys and the memoising asset bank
//! - `tuning`: Data-driven game balance
//! - `game`: Session state machine tying the pieces together

pub mod assets;
pub mod camera;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use camera::{Camera, ViewRect};
pub use error::{AssetError, ConfigError, LoadError};
pub use game::{Game, SessionPhase};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Frames (and simulation ticks) per second
    pub const FPS: u32 = 60;

    /// Window / camera viewport
    pub const SCREEN_WIDTH: u32 = 500;
    pub const SCREEN_HEIGHT: u32 = 400;

    /// Level grid dimensions
    pub const ROWS: usize = 16;
    pub const COLS: usize = 438;
    pub const TILE_SIZE: u32 = 30;
    /// Tile codes 0..TILE_TYPES have artwork; only 0-8 are solid tiles
    pub const TILE_TYPES: u8 = 21;
    pub const MAX_LEVELS: u32 = 3;

    /// Downward acceleration, units/tick²
    pub const GRAVITY: f32 = 0.75;
    /// Upward speed applied by a jump
    pub const JUMP_SPEED: f32 = 15.0;
    /// Horizontal speed while a direction key is held
    pub const RUN_SPEED: f32 = 10.0;

    pub const BULLET_SPEED: f32 = 2.0;
    pub const BULLET_DAMAGE: u32 = 5;

    pub const PLAYER_HEALTH: u32 = 100;
    pub const PLAYER_AMMO: u32 = 20;
    pub const PLAYER_COOLDOWN: u32 = 20;

    pub const ENEMY_HEALTH: u32 = 100;
    pub const ENEMY_AMMO: u32 = 20;
    /// Detection radius
    pub const ENEMY_RANGE: f32 = 200.0;
    /// Ticks between enemy shots
    pub const ENEMY_COOLDOWN: u32 = 100;

    /// Background colour (RGB)
    pub const BG: [u8; 3] = [144, 201, 120];
}

/// Sign of a horizontal component as a facing direction; zero keeps `current`
#[inline]
pub fn facing_from(dx: f32, current: i8) -> i8 {
    if dx < 0.0 {
        -1
    } else if dx > 0.0 {
        1
    } else {
        current
    }
}
