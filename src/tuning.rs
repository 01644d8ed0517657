//! Data-driven game balance
//!
//! Every constant that shapes how Skybound feels lives in [`Tuning`]. The
//! defaults are the shipped values; a host may load a partial JSON document
//! on top of them (missing fields keep their defaults).

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, TICK_RATE};

/// Errors raised while loading or validating a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Visible play area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

/// Game balance values (velocities in px/tick, accelerations in px/tick²)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub viewport: Viewport,

    // === Player physics ===
    pub gravity: f64,
    /// Horizontal acceleration per held direction
    pub h_accel: f64,
    /// Multiplicative horizontal decay per tick
    pub h_friction: f64,
    pub max_h_speed: f64,
    /// Upward impulse on landing (negative is up)
    pub jump_vy: f64,
    pub boost_multiplier: f64,
    /// How far the previous bottom edge may sit below a platform top and still land
    pub landing_tolerance: f64,

    // === Camera and bounds ===
    /// Camera follows once the player rises above this fraction of the screen
    pub camera_threshold: f64,
    /// Player dies this far below the bottom edge
    pub death_margin: f64,
    /// Enemies are dropped this far below the bottom edge
    pub enemy_prune_margin: f64,
    /// Platforms and pickups are dropped this far below the bottom edge
    pub prune_margin: f64,
    /// Rows keep spawning until the highest content is this far above the top edge
    pub spawn_lookahead: f64,

    // === Jetpack ===
    pub jetpack_duration_ticks: u32,
    pub jetpack_ascent_vy: f64,
    pub jetpack_h_decay: f64,
    /// Vertical speed handed back to gravity when the jetpack runs out
    pub jetpack_exit_vy: f64,
    /// Horizontal speed kept on pickup
    pub jetpack_pickup_vx_scale: f64,

    // === Platform generation ===
    pub base_gap: f64,
    pub max_gap: f64,
    /// Score at which the gap stops widening
    pub gap_saturation_score: f64,
    pub boost_chance: f64,
    pub ledge_chance: f64,
    pub powerup_chance: f64,

    // === Enemies ===
    pub max_enemies: usize,
    /// Minimum centre distance between two enemies
    pub enemy_min_gap: f64,
    pub enemy_min_player_dy: f64,
    pub enemy_min_player_dx: f64,
    pub enemy_spawn_base: f64,
    pub enemy_spawn_max_bonus: f64,
    pub enemy_spawn_per_point: f64,
    pub enemy_spawn_attempts: u32,
    pub enemy_speed: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),

            gravity: 0.45,
            h_accel: 0.80,
            h_friction: 0.90,
            max_h_speed: 10.0,
            jump_vy: -13.5,
            boost_multiplier: 1.4,
            landing_tolerance: 2.0,

            camera_threshold: 0.35,
            death_margin: 120.0,
            enemy_prune_margin: 60.0,
            prune_margin: 80.0,
            spawn_lookahead: 200.0,

            jetpack_duration_ticks: TICK_RATE * 3,
            jetpack_ascent_vy: -18.0,
            jetpack_h_decay: 0.92,
            jetpack_exit_vy: -4.0,
            jetpack_pickup_vx_scale: 0.5,

            base_gap: 90.0,
            max_gap: 170.0,
            gap_saturation_score: 150.0,
            boost_chance: 0.12,
            ledge_chance: 0.25,
            powerup_chance: 0.02,

            max_enemies: 2,
            enemy_min_gap: 280.0,
            enemy_min_player_dy: 180.0,
            enemy_min_player_dx: 90.0,
            enemy_spawn_base: 0.002,
            enemy_spawn_max_bonus: 0.008,
            enemy_spawn_per_point: 0.00004,
            enemy_spawn_attempts: 8,
            enemy_speed: 1.8,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate the result
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let finite = [
            ("viewport.width", self.viewport.width),
            ("viewport.height", self.viewport.height),
            ("gravity", self.gravity),
            ("h_accel", self.h_accel),
            ("h_friction", self.h_friction),
            ("max_h_speed", self.max_h_speed),
            ("jump_vy", self.jump_vy),
            ("boost_multiplier", self.boost_multiplier),
            ("landing_tolerance", self.landing_tolerance),
            ("camera_threshold", self.camera_threshold),
            ("death_margin", self.death_margin),
            ("enemy_prune_margin", self.enemy_prune_margin),
            ("prune_margin", self.prune_margin),
            ("spawn_lookahead", self.spawn_lookahead),
            ("jetpack_ascent_vy", self.jetpack_ascent_vy),
            ("jetpack_h_decay", self.jetpack_h_decay),
            ("jetpack_exit_vy", self.jetpack_exit_vy),
            ("jetpack_pickup_vx_scale", self.jetpack_pickup_vx_scale),
            ("base_gap", self.base_gap),
            ("max_gap", self.max_gap),
            ("gap_saturation_score", self.gap_saturation_score),
            ("enemy_min_gap", self.enemy_min_gap),
            ("enemy_min_player_dy", self.enemy_min_player_dy),
            ("enemy_min_player_dx", self.enemy_min_player_dx),
            ("enemy_spawn_per_point", self.enemy_spawn_per_point),
            ("enemy_speed", self.enemy_speed),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be finite",
                });
            }
        }

        let probabilities = [
            ("boost_chance", self.boost_chance),
            ("ledge_chance", self.ledge_chance),
            ("powerup_chance", self.powerup_chance),
            ("enemy_spawn_base", self.enemy_spawn_base),
            ("enemy_spawn_max_bonus", self.enemy_spawn_max_bonus),
            ("camera_threshold", self.camera_threshold),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be within [0, 1]",
                });
            }
        }

        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return Err(TuningError::Invalid {
                field: "viewport",
                reason: "dimensions must be positive",
            });
        }
        // Row generation loops until it clears the lookahead, so gaps must advance
        if self.base_gap <= 0.0 {
            return Err(TuningError::Invalid {
                field: "base_gap",
                reason: "must be positive",
            });
        }
        if self.max_gap < self.base_gap {
            return Err(TuningError::Invalid {
                field: "max_gap",
                reason: "must not be smaller than base_gap",
            });
        }
        if self.gap_saturation_score <= 0.0 {
            return Err(TuningError::Invalid {
                field: "gap_saturation_score",
                reason: "must be positive",
            });
        }
        if self.jetpack_duration_ticks == 0 {
            return Err(TuningError::Invalid {
                field: "jetpack_duration_ticks",
                reason: "must be at least one tick",
            });
        }
        if self.max_enemies == 0 {
            return Err(TuningError::Invalid {
                field: "max_enemies",
                reason: "must be at least one",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.jetpack_duration_ticks, 180);
        assert_eq!(tuning.max_enemies, 2);
        assert_eq!(tuning.viewport.width, 480.0);
        assert_eq!(tuning.viewport.height, 720.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.5, "viewport": { "width": 600, "height": 800 } }"#)
            .unwrap();
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.viewport.width, 600.0);
        assert_eq!(tuning.jump_vy, -13.5);
        assert_eq!(tuning.base_gap, 90.0);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_out_of_range_probability() {
        let err = Tuning::from_json(r#"{ "boost_chance": 1.5 }"#).unwrap_err();
        match err {
            TuningError::Invalid { field, .. } => assert_eq!(field, "boost_chance"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_inverted_gaps() {
        let tuning = Tuning {
            max_gap: 50.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Invalid {
                field: "max_gap",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_zero_enemy_cap() {
        let tuning = Tuning {
            max_enemies: 0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("/nonexistent/skybound-tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
    }
}
