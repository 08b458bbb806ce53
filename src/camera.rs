//! Camera viewport
//!
//! The camera is a screen-sized rectangle in world pixels that snaps to the
//! player's centre every tick. Near the ends of a level it hangs past the
//! world edge; only the in-bounds part has pixels to show, so presentation
//! works with two rectangles:
//!
//! - the visible region in world coordinates (the viewport clipped to the world)
//! - the same region in viewport-local coordinates (where it lands on screen)
//!
//! Everything outside the local rectangle stays blank (letterboxing).

use serde::{Deserialize, Serialize};

use crate::renderer::surface::{Rgba, Surface};
use crate::sim::rect::Rect;

/// Integer pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl ViewRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Overlapping region, `None` when the rectangles do not overlap
    pub fn intersection(&self, other: &ViewRect) -> Option<ViewRect> {
        let l = self.left().max(other.left());
        let t = self.top().max(other.top());
        let r = self.right().min(other.right());
        let b = self.bottom().min(other.bottom());
        let clipped = ViewRect::new(l, t, r - l, b - t);
        (!clipped.is_empty()).then_some(clipped)
    }

    /// Pixel rectangle covering a world rectangle (edges truncated toward -inf)
    pub fn from_world(rect: &Rect) -> Self {
        let x = rect.left().floor() as i32;
        let y = rect.top().floor() as i32;
        Self::new(
            x,
            y,
            rect.right().floor() as i32 - x,
            rect.bottom().floor() as i32 - y,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub rect: ViewRect,
}

impl Camera {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            rect: ViewRect::new(x, y, width as i32, height as i32),
        }
    }

    /// Snap the viewport centre onto the anchor's centre (no smoothing)
    pub fn follow(&mut self, anchor: &Rect) {
        let c = anchor.center();
        self.set_center(c.x.floor() as i32, c.y.floor() as i32);
    }

    pub fn set_center(&mut self, cx: i32, cy: i32) {
        self.rect.x = cx - self.rect.w / 2;
        self.rect.y = cy - self.rect.h / 2;
    }

    /// Visible region in world coordinates and where it sits in the viewport.
    ///
    /// Both rectangles have the same size. A viewport entirely outside the
    /// world yields zero-sized rectangles.
    pub fn get_rects(&self, world_width: i32, world_height: i32) -> (ViewRect, ViewRect) {
        let r = self.rect.right().min(world_width);
        let b = self.rect.bottom().min(world_height);
        let l = self.rect.left().max(0);
        let t = self.rect.top().max(0);
        let (w, h) = ((r - l).max(0), (b - t).max(0));

        let world = ViewRect::new(l, t, w, h);
        let local = ViewRect::new(l - self.rect.left(), t - self.rect.top(), w, h);
        (world, local)
    }

    /// Cut the visible region out of the full-level backing surface into a
    /// viewport-sized surface; areas outside the world stay transparent.
    pub fn get_surface(&self, backscreen: &Surface, world: ViewRect, local: ViewRect) -> Surface {
        let mut surface = Surface::new(self.rect.w as u32, self.rect.h as u32, Rgba::TRANSPARENT);
        if !world.is_empty() {
            surface.blit(backscreen, world, (local.x, local.y));
        }
        surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    const WORLD_W: i32 = 438 * 30;
    const WORLD_H: i32 = 16 * 30;

    #[test]
    fn test_follow_centres_on_anchor() {
        let mut camera = Camera::new(0, 0, 500, 400);
        camera.follow(&Rect::new(1000.0, 200.0, 20.0, 30.0));
        assert_eq!(camera.rect.center(), (1010, 215));
        assert_eq!(camera.rect, ViewRect::new(760, 15, 500, 400));
    }

    #[test]
    fn test_rects_inside_world_are_unclipped() {
        let mut camera = Camera::new(0, 0, 500, 400);
        camera.set_center(1000, 240);
        let (world, local) = camera.get_rects(WORLD_W, WORLD_H);
        assert_eq!(world, camera.rect);
        assert_eq!(local, ViewRect::new(0, 0, 500, 400));
    }

    #[test]
    fn test_clip_at_level_start() {
        let mut camera = Camera::new(0, 0, 500, 400);
        camera.follow(&Rect::centered(Vec2::new(60.0, 100.0), Vec2::new(20.0, 30.0)));
        let (world, local) = camera.get_rects(WORLD_W, WORLD_H);
        // Viewport spans x -190..310, y -100..300
        assert_eq!(world, ViewRect::new(0, 0, 310, 300));
        assert_eq!(local, ViewRect::new(190, 100, 310, 300));
    }

    #[test]
    fn test_clip_at_level_end() {
        let mut camera = Camera::new(0, 0, 500, 400);
        camera.set_center(WORLD_W - 50, 240);
        let (world, local) = camera.get_rects(WORLD_W, WORLD_H);
        assert_eq!(world.right(), WORLD_W);
        assert_eq!(world.w, 300);
        assert_eq!(local.w, world.w);
        assert_eq!(local.x, 0);
    }

    #[test]
    fn test_surface_letterboxes() {
        let mut back = Surface::new(40, 20, Rgba::rgb(0, 255, 0));
        back.fill_rect(ViewRect::new(0, 0, 5, 5), Rgba::rgb(255, 0, 0));

        let mut camera = Camera::new(0, 0, 20, 10);
        camera.set_center(5, 5);
        let (world, local) = camera.get_rects(40, 20);
        assert_eq!(world, ViewRect::new(0, 0, 15, 10));
        assert_eq!(local, ViewRect::new(5, 0, 15, 10));

        let view = camera.get_surface(&back, world, local);
        assert_eq!((view.width(), view.height()), (20, 10));
        assert_eq!(view.pixel(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(view.pixel(5, 0), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(view.pixel(19, 9), Some(Rgba::rgb(0, 255, 0)));
    }

    #[test]
    fn test_viewport_outside_world() {
        let mut camera = Camera::new(0, 0, 100, 100);
        camera.set_center(-500, -500);
        let (world, local) = camera.get_rects(300, 300);
        assert!(world.is_empty());
        assert_eq!(local.w, 0);
        let view = camera.get_surface(&Surface::new(300, 300, Rgba::rgb(1, 1, 1)), world, local);
        assert_eq!(view.pixel(50, 50), Some(Rgba::TRANSPARENT));
    }

    proptest! {
        #[test]
        fn clipped_rects_stay_in_bounds(cx in -600i32..14000, cy in -600i32..1100) {
            let mut camera = Camera::new(0, 0, 500, 400);
            camera.set_center(cx, cy);
            let (world, local) = camera.get_rects(WORLD_W, WORLD_H);

            prop_assert_eq!((world.w, world.h), (local.w, local.h));
            if !world.is_empty() {
                prop_assert!(world.left() >= 0 && world.top() >= 0);
                prop_assert!(world.right() <= WORLD_W && world.bottom() <= WORLD_H);
                prop_assert!(local.left() >= 0 && local.top() >= 0);
                prop_assert!(local.right() <= 500 && local.bottom() <= 400);
            }
        }
    }
}
