//! Skybound - a vertically scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, world generation, run state)
//! - `tuning`: Data-driven game balance and viewport configuration
//! - `highscores`: Best score kept for the lifetime of the host process

pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use tuning::{Tuning, TuningError, Viewport};

/// Game configuration constants
///
/// Entity sizes and layout offsets. Anything that shapes the "feel" of the
/// game (gravity, jump strength, spawn odds) lives in [`Tuning`] instead.
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f64 = 1.0 / TICK_RATE as f64;
    /// Longest frame delta fed into the fixed-step clock
    pub const MAX_FRAME_DT: f64 = 0.1;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default screen dimensions
    pub const SCREEN_WIDTH: f64 = 480.0;
    pub const SCREEN_HEIGHT: f64 = 720.0;

    /// Player box and spawn placement
    pub const PLAYER_WIDTH: f64 = 36.0;
    pub const PLAYER_HEIGHT: f64 = 48.0;
    /// Player spawns this far above the bottom edge
    pub const PLAYER_SPAWN_RISE: f64 = 100.0;
    /// Small upward push at spawn so the first landing is smooth
    pub const PLAYER_SPAWN_VY: f64 = -1.0;

    /// Main platform of a generated row
    pub const PLATFORM_WIDTH: f64 = 120.0;
    pub const PLATFORM_HEIGHT: f64 = 16.0;
    /// Secondary ledge, placed slightly above the main platform
    pub const LEDGE_WIDTH: f64 = 80.0;
    pub const LEDGE_HEIGHT: f64 = 14.0;
    pub const LEDGE_RISE: f64 = 18.0;
    /// Horizontal margin kept free on the left of generated platforms
    pub const SPAWN_MARGIN_X: f64 = 20.0;

    /// Starting ladder
    pub const LADDER_RUNGS: usize = 8;
    pub const LADDER_RUNG_WIDTH: f64 = 100.0;
    pub const LADDER_SPACING: f64 = 90.0;
    pub const LADDER_MARGIN_X: f64 = 40.0;
    /// Right-hand rungs start this far in from the right screen edge
    pub const LADDER_STAGGER_INSET: f64 = 160.0;
    /// First rung sits this far above the bottom edge
    pub const LADDER_BASE_RISE: f64 = 40.0;
    /// Wide safety platform just above the floor (fractions of screen width)
    pub const SAFETY_RISE: f64 = 20.0;
    pub const SAFETY_X_FRACTION: f64 = 0.2;
    pub const SAFETY_WIDTH_FRACTION: f64 = 0.6;

    /// Enemies are square
    pub const ENEMY_SIZE: f64 = 34.0;
    /// Enemies spawn in a band this far above the highest content
    pub const ENEMY_SPAWN_RISE: f64 = 140.0;
    pub const ENEMY_SPAWN_BAND: f64 = 120.0;

    /// Jetpack pickups are square
    pub const POWERUP_SIZE: f64 = 72.0;
    /// Gap between a pickup and the platform it hovers over
    pub const POWERUP_HOVER: f64 = 12.0;

    /// Pixels climbed per point of score
    pub const SCORE_DIVISOR: f64 = 5.0;
}
