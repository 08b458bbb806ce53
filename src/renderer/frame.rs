//! Per-tick render snapshot
//!
//! The snapshot is what the simulation hands to presentation: the visible
//! sprites (position + asset key) and the camera's rectangle pair. The flat
//! rasteriser below draws it onto the full-level backing surface.

use crate::assets::{AssetBank, AssetKey, AssetSource};
use crate::camera::{Camera, ViewRect};
use crate::error::AssetError;
use crate::sim::{EntityId, Level};

use super::surface::{Rgba, Surface};

/// One drawable entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub id: EntityId,
    pub rect: ViewRect,
    pub asset: AssetKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFrame {
    /// Sprites touching the visible region, in entity order
    pub sprites: Vec<Sprite>,
    /// Visible region in world pixels
    pub world: ViewRect,
    /// Where `world` lands inside the viewport
    pub local: ViewRect,
}

impl RenderFrame {
    /// Snapshot the level as seen through `camera`
    pub fn capture(level: &Level, camera: &Camera) -> Self {
        let size = level.world_size();
        let (world, local) = camera.get_rects(size.x as i32, size.y as i32);

        let sprites = level
            .entities()
            .iter()
            .map(|e| Sprite {
                id: e.id,
                rect: ViewRect::from_world(&e.rect),
                asset: e.asset_key(),
            })
            .filter(|s| s.rect.intersection(&world).is_some())
            .collect();

        Self {
            sprites,
            world,
            local,
        }
    }
}

/// Clear the visible region of `backscreen` and draw every sprite as a flat
/// block of its asset colour
pub fn rasterize<S>(
    backscreen: &mut Surface,
    frame: &RenderFrame,
    bank: &mut AssetBank<S>,
    background: Rgba,
) -> Result<(), AssetError>
where
    S: AssetSource<Handle = Rgba>,
{
    backscreen.fill_rect(frame.world, background);
    for sprite in &frame.sprites {
        let color = bank.get(sprite.asset)?;
        backscreen.fill_rect(sprite.rect, color);
    }
    Ok(())
}
