//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per frame
//! - Stable iteration order (by entity ID / spawn order)
//! - No rendering or platform dependencies

pub mod combat;
pub mod entity;
pub mod grid;
pub mod level;
pub mod physics;
pub mod rect;
pub mod tick;

pub use entity::{Bullet, Enemy, Entity, EntityId, EntityKind, ItemKind, Player, Spawn, Tile};
pub use grid::{EMPTY, TileGrid};
pub use level::{Level, Registry};
pub use physics::move_player;
pub use rect::Rect;
pub use tick::{TickOutcome, tick};
