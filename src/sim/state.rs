//! Game state and core simulation types
//!
//! Entities are plain data: the tick and the world generator operate on them
//! through free functions and methods on [`GameState`] / [`World`].

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::world::World;
use crate::consts::*;
use crate::highscores::HighScore;
use crate::tuning::{Tuning, Viewport};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Active gameplay
    Running,
    /// Game is paused (ticks still fire but change nothing)
    Paused,
    /// Run ended, waiting for a restart
    Dead,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Dropped too far below the camera
    Fell,
    /// Touched an enemy without the jetpack
    Enemy,
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner, world space
    pub pos: DVec2,
    pub size: DVec2,
    pub vel: DVec2,
}

impl Player {
    /// Spawn near the bottom of the screen, horizontally centred
    pub fn spawn(viewport: &Viewport) -> Self {
        Self {
            pos: DVec2::new(
                viewport.width / 2.0 - PLAYER_WIDTH / 2.0,
                viewport.height - PLAYER_SPAWN_RISE,
            ),
            size: DVec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel: DVec2::new(0.0, PLAYER_SPAWN_VY),
        }
    }

    /// World-space bounding box
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn screen_y(&self, cam_y: f64) -> f64 {
        self.pos.y - cam_y
    }
}

/// A platform the player can bounce on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub pos: DVec2,
    pub size: DVec2,
    /// Boost platforms give a stronger jump
    pub boost: bool,
}

impl Platform {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            size: DVec2::new(w, h),
            boost: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// A horizontally patrolling enemy (y never changes after spawn)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: DVec2,
    pub size: DVec2,
    /// Signed horizontal speed, flipped on wall bounce
    pub vx: f64,
}

impl Enemy {
    pub fn new(x: f64, y: f64, vx: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            size: DVec2::splat(ENEMY_SIZE),
            vx,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> DVec2 {
        self.rect().center()
    }
}

/// A jetpack pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Powerup {
    pub pos: DVec2,
    pub size: DVec2,
}

impl Powerup {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            size: DVec2::splat(POWERUP_SIZE),
        }
    }

    /// Pickup hovering centred over a platform
    pub fn above(platform: &Platform) -> Self {
        Self::new(
            platform.pos.x + platform.size.x / 2.0 - POWERUP_SIZE / 2.0,
            platform.pos.y - POWERUP_SIZE - POWERUP_HOVER,
        )
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Jetpack flight state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jetpack {
    pub active: bool,
    pub ticks_remaining: u32,
}

impl Jetpack {
    pub fn start(&mut self, duration_ticks: u32) {
        self.active = true;
        self.ticks_remaining = duration_ticks;
    }

    pub fn clear(&mut self) {
        self.active = false;
        self.ticks_remaining = 0;
    }

    /// Count down one tick. Returns true on the tick the flight ends.
    pub fn tick_down(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.ticks_remaining = self.ticks_remaining.saturating_sub(1);
        if self.ticks_remaining == 0 {
            self.active = false;
            return true;
        }
        false
    }
}

/// Complete game state for one session
///
/// Owns the RNG and the high score; both survive [`GameState::restart`], so a
/// session replays identically from its seed and the best score lasts as long
/// as the state itself.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Shared RNG, threaded through every world generator call
    pub(crate) rng: Pcg32,
    /// Spawned platforms, enemies and pickups
    pub world: World,
    pub player: Player,
    /// Camera offset (world y of the top screen edge)
    pub cam_y: f64,
    /// Most negative camera offset reached this run
    pub max_cam_y: f64,
    pub score: u64,
    pub high_score: HighScore,
    pub status: RunStatus,
    pub jetpack: Jetpack,
    /// Simulated ticks this run
    pub time_ticks: u64,
    /// Runs started this session (including the current one)
    pub runs: u32,
    /// Set when the current run ended
    pub death_cause: Option<DeathCause>,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new session with custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let world = World::initial(&tuning);
        let player = Player::spawn(&tuning.viewport);
        let state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            world,
            player,
            cam_y: 0.0,
            max_cam_y: 0.0,
            score: 0,
            high_score: HighScore::new(),
            status: RunStatus::Running,
            jetpack: Jetpack::default(),
            time_ticks: 0,
            runs: 1,
            death_cause: None,
            tuning,
        };
        log::info!("Run 1 started (seed {})", seed);
        state
    }

    /// Throw away the current run and start a fresh one.
    /// The high score and the RNG stream carry over.
    pub fn restart(&mut self) {
        self.world = World::initial(&self.tuning);
        self.player = Player::spawn(&self.tuning.viewport);
        self.cam_y = 0.0;
        self.max_cam_y = 0.0;
        self.score = 0;
        self.status = RunStatus::Running;
        self.jetpack.clear();
        self.time_ticks = 0;
        self.runs += 1;
        self.death_cause = None;
        log::info!(
            "Run {} started (high score {})",
            self.runs,
            self.high_score.best()
        );
    }

    pub fn is_dead(&self) -> bool {
        self.status == RunStatus::Dead
    }

    pub fn player_screen_y(&self) -> f64 {
        self.player.screen_y(self.cam_y)
    }

    /// End the run and bank the score
    pub fn kill(&mut self, cause: DeathCause) {
        self.status = RunStatus::Dead;
        self.death_cause = Some(cause);
        self.jetpack.clear();
        self.high_score.commit(self.score);
        log::info!(
            "Run {} ended ({:?}) at score {} after {} ticks",
            self.runs,
            cause,
            self.score,
            self.time_ticks
        );
    }

    /// Start jetpack flight: full duration, immediate ascent, less drift
    pub fn activate_jetpack(&mut self) {
        self.jetpack.start(self.tuning.jetpack_duration_ticks);
        self.player.vel.y = self.tuning.jetpack_ascent_vy;
        self.player.vel.x *= self.tuning.jetpack_pickup_vx_scale;
        log::debug!("Jetpack activated at y={:.1}", self.player.pos.y);
    }
}
