//! Entity model
//!
//! Every positioned object shares an id and a bounds rectangle; the
//! kind-specific state lives in the [`EntityKind`] payload and behaviour is
//! dispatched by matching on it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::assets::AssetKey;
use crate::tuning::Tuning;

/// Stable handle into a level's entity arena
pub type EntityId = u32;

/// Item box contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Ammo,
    Grenade,
    Health,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Ammo => "ammo",
            ItemKind::Grenade => "grenade",
            ItemKind::Health => "health",
        }
    }
}

/// What a grid code spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spawn {
    Tile(u8),
    Player,
    Enemy,
    ItemBox(ItemKind),
}

impl Spawn {
    /// Map a tile code to what it spawns; unassigned codes spawn nothing
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0..=8 => Some(Spawn::Tile(code as u8)),
            15 => Some(Spawn::Player),
            16 => Some(Spawn::Enemy),
            17 => Some(Spawn::ItemBox(ItemKind::Ammo)),
            18 => Some(Spawn::ItemBox(ItemKind::Grenade)),
            19 => Some(Spawn::ItemBox(ItemKind::Health)),
            _ => None,
        }
    }
}

/// Static, solid block of level geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Appearance (the grid code)
    pub code: u8,
}

/// The controllable soldier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// (x_speed, y_speed)
    pub vel: Vec2,
    pub health: u32,
    pub in_air: bool,
    /// Facing direction, -1 or 1
    pub direction: i8,
    pub ammo: u32,
    pub shoot_cooldown: u32,
    /// Set by input, consumed by the next tick
    #[serde(default)]
    pub shoot_requested: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            vel: Vec2::ZERO,
            health: tuning.player_health,
            in_air: true,
            direction: 1,
            ammo: tuning.player_ammo,
            shoot_cooldown: 0,
            shoot_requested: false,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Start a jump; ignored while airborne (no double jump)
    pub fn jump(&mut self, jump_speed: f32) {
        if !self.in_air {
            self.vel.y = -jump_speed;
            self.in_air = true;
        }
    }

    /// Apply bullet damage, saturating at zero
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }
}

/// A stationary soldier that turns toward and fires at the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Facing direction, -1 or 1
    pub direction: i8,
    pub health: u32,
    pub ammo: u32,
    pub shoot_cooldown: u32,
}

impl Enemy {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            direction: 1,
            health: tuning.enemy_health,
            ammo: tuning.enemy_ammo,
            shoot_cooldown: 0,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// Horizontal projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    /// Signed horizontal speed (speed * direction)
    pub x_speed: f32,
    pub direction: i8,
    /// Soldier that fired it; never damaged by its own bullet
    pub owner: EntityId,
}

/// Kind-specific payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Tile(Tile),
    Player(Player),
    Enemy(Enemy),
    ItemBox(ItemKind),
    Bullet(Bullet),
}

/// A positioned object in a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub rect: Rect,
    pub kind: EntityKind,
}

impl Entity {
    /// Asset the presentation layer should draw for this entity
    pub fn asset_key(&self) -> AssetKey {
        match &self.kind {
            EntityKind::Tile(tile) => AssetKey::Tile(tile.code),
            EntityKind::Player(_) => AssetKey::PlayerIdle,
            EntityKind::Enemy(_) => AssetKey::EnemyIdle,
            EntityKind::ItemBox(kind) => AssetKey::ItemBox(*kind),
            EntityKind::Bullet(_) => AssetKey::Bullet,
        }
    }

    /// Soldiers die at zero health; everything else lives while it is in the level
    pub fn is_alive(&self) -> bool {
        match &self.kind {
            EntityKind::Player(p) => p.is_alive(),
            EntityKind::Enemy(e) => e.is_alive(),
            _ => true,
        }
    }

    pub fn as_player(&self) -> Option<&Player> {
        match &self.kind {
            EntityKind::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut Player> {
        match &mut self.kind {
            EntityKind::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_enemy(&self) -> Option<&Enemy> {
        match &self.kind {
            EntityKind::Enemy(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_bullet(&self) -> Option<&Bullet> {
        match &self.kind {
            EntityKind::Bullet(b) => Some(b),
            _ => None,
        }
    }
}
