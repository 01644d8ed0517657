//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. The step order
//! inside [`tick`] is part of the game's behaviour; landings, camera, spawning
//! and pickups all observe the state left by the previous step.

use serde::{Deserialize, Serialize};

use super::collision::lands_on;
use super::state::{DeathCause, GameState, Platform, Player, RunStatus};
use crate::consts::SCORE_DIVISOR;
use crate::tuning::Tuning;

/// Input for a single tick
///
/// `left`/`right` are held actions; `toggle_pause` and `restart` are edge
/// events the host sets for exactly one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Pause toggle (ignored while dead)
    pub toggle_pause: bool,
    /// Start a new run (ignored unless dead)
    pub restart: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.restart && state.status == RunStatus::Dead {
        state.restart();
        return;
    }

    if input.toggle_pause {
        match state.status {
            RunStatus::Running => {
                state.status = RunStatus::Paused;
                return;
            }
            RunStatus::Paused => state.status = RunStatus::Running,
            RunStatus::Dead => {}
        }
    }

    // Don't tick if paused or dead
    if state.status != RunStatus::Running {
        return;
    }

    state.time_ticks += 1;

    // Horizontal control, then vertical forces
    apply_horizontal_input(&mut state.player, input, state.jetpack.active, &state.tuning);
    if state.jetpack.active {
        state.player.vel.y = state.tuning.jetpack_ascent_vy;
    } else {
        state.player.vel.y += state.tuning.gravity;
    }

    // Move, wrapping around the side edges
    let width = state.tuning.viewport.width;
    state.player.pos.x = wrap_horizontal(
        state.player.pos.x + state.player.vel.x,
        state.player.size.x,
        width,
    );
    let prev_y = state.player.pos.y;
    state.player.pos.y += state.player.vel.y;

    resolve_landing(
        &mut state.player,
        prev_y,
        &state.world.platforms,
        state.cam_y,
        &state.tuning,
    );

    follow_camera(state);

    // Fell out of the bottom of the screen
    let height = state.tuning.viewport.height;
    if state.player_screen_y() > height + state.tuning.death_margin {
        state.kill(DeathCause::Fell);
    }

    // Keep content generated above the visible area
    state
        .world
        .fill_above(state.cam_y, state.score, &mut state.rng);
    state
        .world
        .maybe_spawn_enemy(state.score, &state.player, state.cam_y, &mut state.rng);

    // Pickups are ignored during a flight
    if !state.jetpack.active && state.world.take_powerup(&state.player.rect()) {
        state.activate_jetpack();
    }

    update_enemies(state);

    state.world.prune_below(state.cam_y);

    update_score(state);
    if state.status == RunStatus::Dead {
        // Bank the final score of the tick the run ended on
        state.high_score.commit(state.score);
    }

    if state.jetpack.tick_down() {
        state.player.vel.y = state.tuning.jetpack_exit_vy;
        log::debug!("Jetpack expired");
    }
}

/// Accelerate from held input, clamp, then decay
fn apply_horizontal_input(player: &mut Player, input: &TickInput, jetpack: bool, tuning: &Tuning) {
    if input.left {
        player.vel.x -= tuning.h_accel;
    }
    if input.right {
        player.vel.x += tuning.h_accel;
    }

    player.vel.x = player.vel.x.clamp(-tuning.max_h_speed, tuning.max_h_speed);
    player.vel.x *= if jetpack {
        tuning.jetpack_h_decay
    } else {
        tuning.h_friction
    };
}

/// Screen-edge wraparound: a box that fully leaves one side reappears just
/// outside the other.
pub fn wrap_horizontal(x: f64, w: f64, screen_width: f64) -> f64 {
    if x < -w {
        screen_width
    } else if x > screen_width {
        -w
    } else {
        x
    }
}

/// Bounce the player off any platform it came down onto this tick.
///
/// Only applies while falling. Every platform is tested in insertion order
/// against the player's current box, so when several qualify the last one
/// wins. Returns the index of that platform.
pub fn resolve_landing(
    player: &mut Player,
    prev_y: f64,
    platforms: &[Platform],
    cam_y: f64,
    tuning: &Tuning,
) -> Option<usize> {
    if player.vel.y <= 0.0 {
        return None;
    }

    let prev_bottom = prev_y - cam_y + player.size.y;
    let mut landed = None;
    for (index, platform) in platforms.iter().enumerate() {
        let platform_rect = platform.rect().shifted_y(-cam_y);
        let player_rect = player.rect().shifted_y(-cam_y);

        if lands_on(&player_rect, prev_bottom, &platform_rect, tuning.landing_tolerance) {
            player.pos.y = platform_rect.top() - player.size.y + cam_y;
            player.vel.y = if platform.boost {
                tuning.jump_vy * tuning.boost_multiplier
            } else {
                tuning.jump_vy
            };
            landed = Some(index);
        }
    }
    landed
}

/// Scroll up so the player never rises above the follow threshold
fn follow_camera(state: &mut GameState) {
    let threshold = state.tuning.viewport.height * state.tuning.camera_threshold;
    let screen_y = state.player_screen_y();
    if screen_y < threshold {
        state.cam_y -= threshold - screen_y;
        state.max_cam_y = state.max_cam_y.min(state.cam_y);
    }
}

/// Move enemies and check them against the player
fn update_enemies(state: &mut GameState) {
    state.world.move_enemies(state.cam_y);

    if state.status == RunStatus::Dead || state.jetpack.active {
        return;
    }
    let player_rect = state.player.rect().shifted_y(-state.cam_y);
    let hit = state
        .world
        .enemies
        .iter()
        .any(|e| e.rect().shifted_y(-state.cam_y).intersects(&player_rect));
    if hit {
        state.kill(DeathCause::Enemy);
    }
}

/// Score follows the highest point ever reached, so falling never lowers it
fn update_score(state: &mut GameState) {
    let climbed = (-state.max_cam_y / SCORE_DIVISOR).round().max(0.0) as u64;
    state.score = state.score.max(climbed);
}
