//! Fixed-step frame driver
//!
//! Input events arrive whenever the platform delivers them; the simulator
//! consumes them once per tick. `InputQueue` latches edges until a tick
//! takes them, and `FrameDriver` turns real elapsed time into a whole
//! number of fixed ticks.

use crate::best_score::ScoreStore;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{RunController, TickInput};

/// Latched input edges between ticks
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    jump_requested: bool,
    jump_held: bool,
    reset_requested: bool,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump key/button went down
    pub fn press_jump(&mut self) {
        self.jump_requested = true;
        self.jump_held = true;
    }

    /// Jump key/button went up
    pub fn release_jump(&mut self) {
        self.jump_held = false;
    }

    pub fn request_reset(&mut self) {
        self.reset_requested = true;
    }

    /// Input for the next tick; clears the jump edge, keeps the held level
    pub fn take(&mut self) -> TickInput {
        let input = TickInput {
            jump_requested: self.jump_requested,
            jump_held: self.jump_held,
        };
        self.jump_requested = false;
        input
    }

    /// Consume a pending reset request
    pub fn take_reset(&mut self) -> bool {
        std::mem::take(&mut self.reset_requested)
    }
}

/// Accumulates real time and runs fixed simulation steps
#[derive(Debug, Clone)]
pub struct FrameDriver {
    dt: f32,
    max_substeps: u32,
    max_frame_dt: f32,
    accumulator: f32,
    last_time_ms: Option<f64>,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::with_step(SIM_DT, MAX_SUBSTEPS)
    }

    pub fn with_step(dt: f32, max_substeps: u32) -> Self {
        Self {
            dt,
            max_substeps: max_substeps.max(1),
            max_frame_dt: MAX_FRAME_DT,
            accumulator: 0.0,
            last_time_ms: None,
        }
    }

    /// Forget the previous timestamp (after a pause or restart) so the next
    /// frame does not see the gap as elapsed time
    pub fn resync(&mut self) {
        self.last_time_ms = None;
        self.accumulator = 0.0;
    }

    /// Advance to the platform timestamp `now_ms`; returns ticks run
    pub fn frame<S: ScoreStore>(
        &mut self,
        now_ms: f64,
        controller: &mut RunController<S>,
        input: &mut InputQueue,
    ) -> u32 {
        let elapsed = match self.last_time_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_time_ms = Some(now_ms);
        self.advance(elapsed, controller, input)
    }

    /// Advance by `elapsed` seconds of real time; returns ticks run
    pub fn advance<S: ScoreStore>(
        &mut self,
        elapsed: f32,
        controller: &mut RunController<S>,
        input: &mut InputQueue,
    ) -> u32 {
        if input.take_reset() {
            controller.reset(None);
            self.accumulator = 0.0;
        }

        if !controller.state().is_running() {
            self.accumulator = 0.0;
            return 0;
        }

        self.accumulator += elapsed.clamp(0.0, self.max_frame_dt);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            let tick_input = input.take();
            controller.tick(&tick_input, self.dt);
            self.accumulator -= self.dt;
            substeps += 1;

            if !controller.state().is_running() {
                self.accumulator = 0.0;
                break;
            }
        }

        if substeps == self.max_substeps && self.accumulator >= self.dt {
            log::debug!("Dropping {:.4}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }

        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::best_score::MemoryStore;
    use crate::sim::RunPhase;
    use crate::tuning::Tuning;

    fn running() -> RunController<MemoryStore> {
        let mut ctl = RunController::new(Tuning::default(), 12345, MemoryStore::new());
        ctl.start();
        ctl
    }

    #[test]
    fn test_input_edge_consumed_once() {
        let mut input = InputQueue::new();
        input.press_jump();
        let first = input.take();
        assert!(first.jump_requested && first.jump_held);
        let second = input.take();
        assert!(!second.jump_requested && second.jump_held);

        input.release_jump();
        assert!(!input.take().jump_held);
    }

    #[test]
    fn test_whole_ticks_from_elapsed_time() {
        let mut driver = FrameDriver::new();
        let mut ctl = running();
        let mut input = InputQueue::new();

        assert_eq!(driver.advance(0.03, &mut ctl, &mut input), 3);
        assert_eq!(ctl.state().time_ticks, 3);
        // Remainder carries into the next frame
        assert!(driver.accumulator > 0.0);
    }

    #[test]
    fn test_small_frames_accumulate() {
        let mut driver = FrameDriver::new();
        let mut ctl = running();
        let mut input = InputQueue::new();

        let mut total = 0;
        for _ in 0..10 {
            total += driver.advance(0.004, &mut ctl, &mut input);
        }
        // 40 ms at 120 Hz
        assert!((4..=5).contains(&total));
    }

    #[test]
    fn test_long_frame_clamped() {
        let mut driver = FrameDriver::new();
        let mut ctl = running();
        let mut input = InputQueue::new();

        // A 2 s stall only counts as 50 ms
        let ticks = driver.advance(2.0, &mut ctl, &mut input);
        assert!(ticks <= 6);
    }

    #[test]
    fn test_substep_cap() {
        let mut driver = FrameDriver::with_step(0.01, 2);
        let mut ctl = running();
        let mut input = InputQueue::new();

        assert_eq!(driver.advance(0.045, &mut ctl, &mut input), 2);
        // Backlog dropped
        assert_eq!(driver.accumulator, 0.0);
    }

    #[test]
    fn test_jump_edge_survives_empty_frame() {
        let mut driver = FrameDriver::new();
        let mut ctl = running();
        let mut input = InputQueue::new();

        input.press_jump();
        assert_eq!(driver.advance(0.001, &mut ctl, &mut input), 0);
        driver.advance(0.01, &mut ctl, &mut input);
        assert_eq!(ctl.state().player.vy, ctl.state().tuning.jump_power);
    }

    #[test]
    fn test_idle_controller_runs_no_ticks() {
        let mut driver = FrameDriver::new();
        let mut ctl = RunController::new(Tuning::default(), 1, MemoryStore::new());
        let mut input = InputQueue::new();
        assert_eq!(driver.advance(0.05, &mut ctl, &mut input), 0);
        assert_eq!(ctl.phase(), RunPhase::Idle);
    }

    #[test]
    fn test_reset_request_restarts_from_game_over() {
        let mut driver = FrameDriver::new();
        let mut ctl = running();
        let mut input = InputQueue::new();

        // Run until the player crashes into the first obstacle
        let mut guard = 0;
        while ctl.phase() == RunPhase::Running && guard < 10_000 {
            driver.advance(0.05, &mut ctl, &mut input);
            guard += 1;
        }
        assert_eq!(ctl.phase(), RunPhase::GameOver);

        input.request_reset();
        driver.advance(0.0, &mut ctl, &mut input);
        assert_eq!(ctl.phase(), RunPhase::Running);
        assert_eq!(ctl.state().score, 0);

        // The request is consumed once; the next frame just runs
        driver.advance(SIM_DT, &mut ctl, &mut input);
        assert_eq!(ctl.state().time_ticks, 1);
        assert!(!input.take_reset());
    }

    #[test]
    fn test_frame_timestamps() {
        let mut driver = FrameDriver::new();
        let mut ctl = running();
        let mut input = InputQueue::new();

        // First frame only records the timestamp
        assert_eq!(driver.frame(1000.0, &mut ctl, &mut input), 0);
        assert_eq!(driver.frame(1030.0, &mut ctl, &mut input), 3);

        driver.resync();
        assert_eq!(driver.frame(9000.0, &mut ctl, &mut input), 0);
    }
}
