//! Animation state for the loading indicator

use std::time::{Duration, Instant};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Time-driven spinner; the frame depends only on elapsed time so the
/// event loop does not need to tick it
#[derive(Clone, Debug)]
pub struct Spinner {
    start: Instant,
    frame_duration: Duration,
}

impl Spinner {
    pub fn new(frame_ms: u64) -> Self {
        Self {
            start: Instant::now(),
            frame_duration: Duration::from_millis(frame_ms.max(1)),
        }
    }

    /// Frame index after `elapsed`
    pub fn frame_index(&self, elapsed: Duration) -> usize {
        let ticks = elapsed.as_millis() / self.frame_duration.as_millis();
        (ticks % SPINNER_FRAMES.len() as u128) as usize
    }

    /// Current frame glyph
    pub fn frame(&self) -> &'static str {
        SPINNER_FRAMES[self.frame_index(self.start.elapsed())]
    }

    /// Restart from the first frame
    pub fn reset(&mut self) {
        self.start = Instant::now();
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new(80)
    }
}
