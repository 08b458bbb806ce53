//! Window side of presentation

use crate::camera::ViewRect;
use crate::renderer::{Rgba, Surface};

/// Something that can show a finished surface at a destination rectangle
pub trait Present {
    fn present(&mut self, surface: &Surface, dest: ViewRect);
}

/// Off-screen window: keeps the last composed screen in memory
#[derive(Debug)]
pub struct HeadlessWindow {
    screen: Surface,
    clear: Rgba,
    presented: u64,
}

impl HeadlessWindow {
    pub fn new(width: u32, height: u32, clear: Rgba) -> Self {
        Self {
            screen: Surface::new(width, height, clear),
            clear,
            presented: 0,
        }
    }

    pub fn screen(&self) -> &Surface {
        &self.screen
    }

    /// Frames presented so far
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Present for HeadlessWindow {
    fn present(&mut self, surface: &Surface, dest: ViewRect) {
        self.screen.fill(self.clear);
        self.screen.blit(surface, surface.bounds(), (dest.x, dest.y));
        self.presented += 1;
    }
}
