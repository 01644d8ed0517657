//! Best score tracking
//!
//! Lives as long as whatever owns it (normally the host process). It is
//! carried across restarts and never written to storage.

use serde::{Deserialize, Serialize};

/// Highest score reached across runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current best score
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished (or finishing) run's score.
    /// Returns true when it set a new best.
    pub fn commit(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        log::info!("New high score: {} (was {})", score, self.best);
        self.best = score;
        true
    }
}
