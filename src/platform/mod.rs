//! Platform abstraction layer
//!
//! Handles the pieces a windowing backend feeds into the game:
//! - Input events (discrete key presses/releases)
//! - Time (frame-rate limiting)
//! - Presenting finished frames

pub mod input;
pub mod present;
pub mod time;

pub use input::{InputEvent, Key};
pub use present::{HeadlessWindow, Present};
pub use time::FrameClock;
