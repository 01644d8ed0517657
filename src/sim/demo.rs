//! Demo autopilot
//!
//! Produces input for unattended play (attract mode, soak runs). It only reads
//! the state, never the RNG, so a seeded demo session is reproducible.

use super::state::{GameState, Platform, RunStatus};
use super::tick::TickInput;

/// Horizontal slack before the autopilot bothers steering
const STEER_DEAD_ZONE: f64 = 8.0;

/// Pick the input an attentive player would hold this tick
pub fn demo_input(state: &GameState) -> TickInput {
    match state.status {
        RunStatus::Dead => {
            return TickInput {
                restart: true,
                ..Default::default()
            };
        }
        RunStatus::Paused => {
            return TickInput {
                toggle_pause: true,
                ..Default::default()
            };
        }
        RunStatus::Running => {}
    }

    let Some(target) = next_platform(state) else {
        return TickInput::default();
    };

    let dx = target.rect().center().x - state.player.rect().center().x;
    TickInput {
        left: dx < -STEER_DEAD_ZONE,
        right: dx > STEER_DEAD_ZONE,
        ..Default::default()
    }
}

/// Closest platform above the player's feet that one jump can still reach
fn next_platform(state: &GameState) -> Option<&Platform> {
    let tuning = &state.tuning;
    let feet = state.player.rect().bottom();
    let reach = tuning.jump_vy * tuning.jump_vy / (2.0 * tuning.gravity);

    state
        .world
        .platforms
        .iter()
        .filter(|p| p.pos.y < feet && feet - p.pos.y <= reach)
        .min_by(|a, b| {
            (feet - a.pos.y)
                .partial_cmp(&(feet - b.pos.y))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}
