//! CPU pixel surface
//!
//! Row-major RGBA8 buffer. The window collaborator uploads `as_bytes()`
//! however it likes; everything here is plain memory copies.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::camera::ViewRect;

/// One RGBA8 pixel
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

impl From<[u8; 3]> for Rgba {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgba::rgb(r, g, b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Surface {
    /// Surface of the given size filled with `fill`
    pub fn new(width: u32, height: u32, fill: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whole-surface bounds
    pub fn bounds(&self) -> ViewRect {
        ViewRect::new(0, 0, self.width as i32, self.height as i32)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Fill `rect`, clipped to the surface
    pub fn fill_rect(&mut self, rect: ViewRect, color: Rgba) {
        let Some(r) = rect.intersection(&self.bounds()) else {
            return;
        };
        for y in r.top()..r.bottom() {
            let row = (y as u32 * self.width) as usize;
            self.pixels[row + r.left() as usize..row + r.right() as usize].fill(color);
        }
    }

    /// Copy the `src_rect` region of `src` so its top-left lands at `dst`.
    /// Both ends are clipped; nothing outside either surface is touched.
    pub fn blit(&mut self, src: &Surface, src_rect: ViewRect, dst: (i32, i32)) {
        let Some(src_clip) = src_rect.intersection(&src.bounds()) else {
            return;
        };
        // Shift the destination by however much the source was clipped
        let dst_rect = ViewRect::new(
            dst.0 + (src_clip.x - src_rect.x),
            dst.1 + (src_clip.y - src_rect.y),
            src_clip.w,
            src_clip.h,
        );
        let Some(dst_clip) = dst_rect.intersection(&self.bounds()) else {
            return;
        };
        let sx = src_clip.x + (dst_clip.x - dst_rect.x);
        let sy = src_clip.y + (dst_clip.y - dst_rect.y);

        for row in 0..dst_clip.h {
            let s = ((sy + row) as u32 * src.width + sx as u32) as usize;
            let d = ((dst_clip.y + row) as u32 * self.width + dst_clip.x as u32) as usize;
            let w = dst_clip.w as usize;
            self.pixels[d..d + w].copy_from_slice(&src.pixels[s..s + w]);
        }
    }

    /// Raw RGBA8 bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
