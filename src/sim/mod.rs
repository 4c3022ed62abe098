//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (cosmetic particles use a separate stream)
//! - Obstacles kept in ascending x order
//! - No rendering or platform dependencies

pub mod collision;
pub mod lifecycle;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, sweep_steps, sweeps};
pub use lifecycle::RunController;
pub use rng::Lcg;
pub use spawn::ensure_lookahead;
pub use state::{GameState, Obstacle, Particle, Player, RunPhase};
pub use tick::{TickInput, TickOutcome, tick};
