//! Read-only view of the simulation for presentation
//!
//! Taken between ticks; renderers and HUDs draw from it without touching
//! [`GameState`].

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::{Enemy, GameState, Jetpack, Platform, Player, Powerup, RunStatus};

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub powerups: Vec<Powerup>,
    pub cam_y: f64,
    pub score: u64,
    pub high_score: u64,
    pub status: RunStatus,
    pub jetpack: Jetpack,
    pub time_ticks: u64,
}

impl Snapshot {
    /// World position to screen position
    pub fn to_screen(&self, world: DVec2) -> DVec2 {
        DVec2::new(world.x, world.y - self.cam_y)
    }
}

impl GameState {
    /// Copy out the drawable state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: self.player.clone(),
            platforms: self.world.platforms.clone(),
            enemies: self.world.enemies.clone(),
            powerups: self.world.powerups.clone(),
            cam_y: self.cam_y,
            score: self.score,
            high_score: self.high_score.best(),
            status: self.status,
            jetpack: self.jetpack,
            time_ticks: self.time_ticks,
        }
    }
}
