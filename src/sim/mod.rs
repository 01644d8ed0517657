//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, passed explicitly to the world generator
//! - Stable iteration order (insertion order of every entity list)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod demo;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod world;

pub use clock::FixedStep;
pub use collision::{Rect, lands_on, rects_overlap};
pub use demo::demo_input;
pub use snapshot::Snapshot;
pub use state::{DeathCause, Enemy, GameState, Jetpack, Platform, Player, Powerup, RunStatus};
pub use tick::{TickInput, resolve_landing, tick, wrap_horizontal};
pub use world::World;
