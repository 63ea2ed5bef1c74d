//! Per-tick countdowns and stopwatches.
//!
//! Every timed grace window in the game (jump cooldown, jump buffer, wall
//! ride, sticky walls) is a plain field advanced by the tick's delta time
//! and compared against a threshold on the same tick. Restarting a window
//! is just resetting the field.

/// A window that is live until its remaining time runs out.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    /// (Re)start the window, replacing any window that was still running.
    pub fn start(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
    }

    /// Advance by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn is_running(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// End the window early.
    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }
}

/// Accumulates elapsed time until reset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stopwatch {
    elapsed: f32,
}

impl Stopwatch {
    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
