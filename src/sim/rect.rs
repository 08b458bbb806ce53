//! Axis-aligned bounds shared by every entity
//!
//! Y grows downward (screen convention): `top` is the smaller y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle of `size` centred on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Copy shifted by `delta`
    #[inline]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            pos: self.pos + delta,
            size: self.size,
        }
    }

    /// Strict overlap: rectangles that only share an edge do not collide,
    /// so a player resting on a tile can still walk along it.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(30.0, 60.0, 20.0, 30.0);
        assert_eq!(r.left(), 30.0);
        assert_eq!(r.right(), 50.0);
        assert_eq!(r.top(), 60.0);
        assert_eq!(r.bottom(), 90.0);
        assert_eq!(r.center(), Vec2::new(40.0, 75.0));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let tile = Rect::new(0.0, 30.0, 30.0, 30.0);
        let standing = Rect::new(5.0, 0.0, 20.0, 30.0);
        assert!(!standing.overlaps(&tile));
        assert!(standing.translated(Vec2::new(0.0, 0.75)).overlaps(&tile));
    }

    #[test]
    fn test_centered() {
        let r = Rect::centered(Vec2::new(100.0, 50.0), Vec2::new(10.0, 6.0));
        assert_eq!(r.pos, Vec2::new(95.0, 47.0));
        assert_eq!(r.center(), Vec2::new(100.0, 50.0));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn rect_overlaps_itself(x in -500.0f32..500.0, y in -500.0f32..500.0, w in 1.0f32..100.0, h in 1.0f32..100.0) {
            let r = Rect::new(x, y, w, h);
            prop_assert!(r.overlaps(&r));
        }
    }
}
