//! Pulse Runner - a one-button side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, run lifecycle)
//! - `driver`: Fixed-step frame driver and input edge queue
//! - `renderer`: Vertex generation and WebGL presentation
//! - `best_score`: Persisted best score
//! - `tuning`: Data-driven game balance
//! - `chess`, `aim`: the other two toys on the landing page

pub mod aim;
pub mod best_score;
pub mod chess;
pub mod demo;
pub mod driver;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use best_score::{MemoryStore, ScoreStore};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Maximum live particles
    pub const MAX_PARTICLES: usize = 256;
}
