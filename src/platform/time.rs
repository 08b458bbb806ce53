//! Frame-rate limiting for the native loop

use std::thread;
use std::time::{Duration, Instant};

/// Sleeps out the remainder of each frame so the loop runs at most `fps`
#[derive(Debug)]
pub struct FrameClock {
    frame: Duration,
    last: Instant,
    frames: u64,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / fps.max(1),
            last: Instant::now(),
            frames: 0,
        }
    }

    /// Target frame duration
    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Block until one frame has passed since the previous call; returns the
    /// time actually elapsed
    pub fn tick(&mut self) -> Duration {
        let elapsed = self.last.elapsed();
        if elapsed < self.frame {
            thread::sleep(self.frame - elapsed);
        }
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        self.frames += 1;
        dt
    }

    /// Frames completed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
