//! Asset identity and caching
//!
//! The simulation only ever names assets by [`AssetKey`]. Decoding is the job
//! of an [`AssetSource`]; the [`AssetBank`] owned by the composition root
//! memoises whatever the source produces.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AssetError;
use crate::renderer::surface::Rgba;
use crate::sim::entity::ItemKind;

/// Stable name of a visual asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKey {
    Tile(u8),
    PlayerIdle,
    EnemyIdle,
    Bullet,
    ItemBox(ItemKind),
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKey::Tile(code) => write!(f, "tile/{code}"),
            AssetKey::PlayerIdle => f.write_str("player/idle"),
            AssetKey::EnemyIdle => f.write_str("enemy/idle"),
            AssetKey::Bullet => f.write_str("icons/bullet"),
            AssetKey::ItemBox(kind) => write!(f, "icons/{}_box", kind.as_str()),
        }
    }
}

/// Produces the visual handle for a key (image decoder, texture uploader, ...)
pub trait AssetSource {
    type Handle: Clone;

    fn load(&mut self, key: AssetKey) -> Result<Self::Handle, AssetError>;
}

/// Memoising cache in front of an [`AssetSource`]
pub struct AssetBank<S: AssetSource> {
    source: S,
    cache: HashMap<AssetKey, S::Handle>,
}

impl<S: AssetSource> AssetBank<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    /// Handle for `key`, loading it on first use
    pub fn get(&mut self, key: AssetKey) -> Result<S::Handle, AssetError> {
        if let Some(handle) = self.cache.get(&key) {
            return Ok(handle.clone());
        }
        let handle = self.source.load(key)?;
        log::debug!("Loaded asset {key}");
        self.cache.insert(key, handle.clone());
        Ok(handle)
    }

    /// Number of distinct assets loaded so far
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Flat-colour stand-in art for headless runs
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderArt;

impl AssetSource for PlaceholderArt {
    type Handle = Rgba;

    fn load(&mut self, key: AssetKey) -> Result<Rgba, AssetError> {
        let color = match key {
            AssetKey::Tile(code) if code < crate::consts::TILE_TYPES => {
                // Darker shades for higher codes
                let shade = 150u8.saturating_sub(code * 10);
                Rgba::rgb(shade, shade / 2 + 40, 30)
            }
            AssetKey::Tile(code) => {
                return Err(AssetError::Missing {
                    key: format!("tile/{code}"),
                });
            }
            AssetKey::PlayerIdle => Rgba::rgb(40, 90, 200),
            AssetKey::EnemyIdle => Rgba::rgb(200, 40, 40),
            AssetKey::Bullet => Rgba::rgb(20, 20, 20),
            AssetKey::ItemBox(ItemKind::Ammo) => Rgba::rgb(210, 180, 60),
            AssetKey::ItemBox(ItemKind::Grenade) => Rgba::rgb(90, 110, 60),
            AssetKey::ItemBox(ItemKind::Health) => Rgba::rgb(240, 240, 240),
        };
        Ok(color)
    }
}
