//! Frame clock
//!
//! Accumulates frame deltas instead of sampling wall time so a session
//! replays identically from the same inputs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Clock {
    /// Seconds since the session was created
    pub total: f64,
    /// Seconds since the last level reset
    pub level: f32,
}

impl Clock {
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.total += dt as f64;
        self.level += dt;
    }

    pub fn reset_level(&mut self) {
        self.level = 0.0;
    }

    /// Distance covered at `speed` since the level started, in whole pixels
    pub fn distance(&self, speed: f32) -> u32 {
        (self.level * speed) as u32
    }
}
