//! Software presentation helpers
//!
//! Produces pixels for an external window to present; no window or GPU code here.

pub mod frame;
pub mod surface;

pub use frame::{RenderFrame, Sprite, rasterize};
pub use surface::{Rgba, Surface};
