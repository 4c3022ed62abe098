//! Run lifecycle: Idle -> Running -> GameOver -> (reset) -> Running
//!
//! The controller owns the world and the best-score store. It never drives
//! frames itself; a frame driver calls `tick` at the fixed step.

use super::state::{GameState, RunPhase};
use super::tick::{TickInput, TickOutcome, tick};
use crate::best_score::ScoreStore;
use crate::tuning::Tuning;

pub struct RunController<S: ScoreStore> {
    state: GameState,
    store: S,
    best: u64,
}

impl<S: ScoreStore> RunController<S> {
    /// New controller with an Idle world built from `seed`
    pub fn new(tuning: Tuning, seed: i64, store: S) -> Self {
        let best = store.load();
        log::info!("Run initialized with seed {} (best {})", seed, best);
        Self {
            state: GameState::new(tuning, seed),
            store,
            best,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn seed(&self) -> i64 {
        self.state.seed
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Idle -> Running. A finished run must be reset instead.
    pub fn start(&mut self) -> bool {
        if self.state.phase == RunPhase::Idle {
            self.state.phase = RunPhase::Running;
            log::info!("Run started (seed {})", self.state.seed);
            true
        } else {
            false
        }
    }

    /// Rebuild the world from `seed` (or the current seed) and start running
    pub fn reset(&mut self, seed: Option<i64>) {
        self.reset_idle(seed);
        self.state.phase = RunPhase::Running;
    }

    /// Rebuild the world from `seed` (or the current seed) and leave it Idle
    pub fn reset_idle(&mut self, seed: Option<i64>) {
        let seed = seed.unwrap_or(self.state.seed);
        self.state = GameState::new(self.state.tuning, seed);
        log::info!("Run reset with seed {}", seed);
    }

    /// One fixed step. A collision ends the run and records a new best.
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> TickOutcome {
        let outcome = tick(&mut self.state, input, dt);
        if outcome == TickOutcome::Collided {
            self.record_best();
        }
        outcome
    }

    fn record_best(&mut self) {
        if self.state.score > self.best {
            self.best = self.state.score;
            self.store.save(self.best);
            log::info!("New best score: {}", self.best);
        }
    }
}
