//! Headless autopilot runs
//!
//! Used by the native binary and by tests to exercise whole runs without a
//! browser. The autopilot only looks at the world state, the way a player
//! looks at the screen.

use crate::best_score::ScoreStore;
use crate::consts::SIM_DT;
use crate::sim::{
    GameState, Obstacle, RunController, RunPhase, TickInput, TickOutcome, sweeps,
};
use crate::tuning::Tuning;

/// Ticks of staying grounded checked for an upcoming collision
const DANGER_HORIZON: u32 = 60;
/// Longest simulated jump (ticks)
const FLIGHT_LIMIT: u32 = 150;

/// Summary of one headless run
#[derive(Debug, Clone, PartialEq)]
pub struct DemoReport {
    pub seed: i64,
    pub ticks: u64,
    pub score: u64,
    pub best: u64,
    pub crashed: bool,
}

/// Result of playing the player's motion forward against the current course
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Forecast {
    collided: bool,
    /// The nearest obstacle ahead is behind the player on landing
    passed_next: bool,
}

/// Simulate the player for up to `max_ticks`, jumping on the first tick if
/// `jump`. Stops at the first landing after being airborne. Scroll speed is
/// held at its current value and no new obstacles appear.
fn forecast(state: &GameState, jump: bool, max_ticks: u32) -> Forecast {
    let tuning = &state.tuning;
    let dt = SIM_DT;
    let mut player = state.player.clone();
    let mut obstacles: Vec<Obstacle> = state.obstacles.iter().copied().collect();
    let next = obstacles.iter().position(|ob| ob.right() > player.pos.x);
    let scroll = state.scroll_speed() * dt;
    let mut airborne = false;

    for step in 0..max_ticks {
        player.vy = (player.vy + tuning.gravity * dt).min(tuning.max_fall_speed);
        player.pos.y += player.vy * dt;
        if player.pos.y >= player.ground_y {
            player.pos.y = player.ground_y;
            player.vy = 0.0;
            player.on_ground = true;
            if airborne {
                let passed_next =
                    next.is_none_or(|i| obstacles[i].right() <= player.pos.x);
                return Forecast {
                    collided: false,
                    passed_next,
                };
            }
        } else {
            player.on_ground = false;
        }

        if jump && step == 0 && player.on_ground {
            player.vy = player.jump_power;
            player.on_ground = false;
        }
        airborne |= !player.on_ground;

        for ob in obstacles.iter_mut() {
            ob.x -= scroll;
        }
        if obstacles.iter().any(|ob| sweeps(&player, ob, dt)) {
            return Forecast {
                collided: true,
                passed_next: false,
            };
        }
    }

    Forecast {
        collided: false,
        passed_next: true,
    }
}

/// Pick this tick's input the way a player reads the screen: stay put while
/// the ground is safe, and take a full jump as soon as one clears the next
/// obstacle and lands safely.
pub fn autopilot(state: &GameState) -> TickInput {
    if !state.player.on_ground {
        return TickInput {
            jump_held: true,
            ..TickInput::default()
        };
    }

    if !forecast(state, false, DANGER_HORIZON).collided {
        return TickInput::default();
    }

    let jump = forecast(state, true, FLIGHT_LIMIT);
    let go = !jump.collided && jump.passed_next;
    TickInput {
        jump_requested: go,
        jump_held: go,
    }
}

/// Run one seeded game for at most `max_ticks` fixed steps
pub fn run_headless<S: ScoreStore>(
    tuning: Tuning,
    seed: i64,
    max_ticks: u64,
    store: S,
) -> (DemoReport, S) {
    let mut controller = RunController::new(tuning, seed, store);
    controller.start();

    let mut crashed = false;
    for _ in 0..max_ticks {
        let input = autopilot(controller.state());
        if controller.tick(&input, SIM_DT) == TickOutcome::Collided {
            crashed = true;
            break;
        }
    }

    let state = controller.state();
    let report = DemoReport {
        seed,
        ticks: state.time_ticks,
        score: state.score,
        best: controller.best(),
        crashed: crashed || state.phase == RunPhase::GameOver,
    };
    log::info!(
        "Headless run: seed {} ticks {} score {} best {}{}",
        report.seed,
        report.ticks,
        report.score,
        report.best,
        if report.crashed { " (crashed)" } else { "" }
    );

    let store = controller.into_store();
    (report, store)
}
