//! Procedural obstacle spawning
//!
//! Keeps a lookahead buffer of obstacles to the right of the screen. All
//! draws come from the run's `Lcg`, so a seed fixes the whole course.

use super::state::{GameState, Obstacle};

/// Gap to the previous obstacle: 160 + [0, 240)
const GAP_MIN: i32 = 160;
const GAP_SPAN: i32 = 240;
/// Width: 24 + [0, 90)
const WIDTH_MIN: i32 = 24;
const WIDTH_SPAN: i32 = 90;
/// Height: 24 + [0, 80)
const HEIGHT_MIN: i32 = 24;
const HEIGHT_SPAN: i32 = 80;
/// Assumed x of the previous obstacle when none is pending
const EMPTY_LAST_OFFSET: f32 = 100.0;
/// New obstacles start at least this far past the right edge
const MIN_SPAWN_OFFSET: f32 = 60.0;

/// Upper bound on spawns in one `populate` call
const MAX_POPULATE: usize = 64;

/// Whether the buffer needs another obstacle: fewer than the lookahead count
/// pending, or the newest one already drifted inside the spawn margin.
pub fn needs_spawn(state: &GameState) -> bool {
    let tuning = &state.tuning;
    if state.obstacles.len() < tuning.lookahead_count {
        return true;
    }
    state
        .obstacles
        .back()
        .is_some_and(|last| last.x < tuning.screen_width - tuning.spawn_margin)
}

/// Append one obstacle behind the newest, always starting off-screen right
pub fn spawn_obstacle(state: &mut GameState) {
    let width = state.tuning.screen_width;
    let floor_y = state.tuning.floor_y();
    let last_x = state
        .obstacles
        .back()
        .map(|ob| ob.x)
        .unwrap_or(width + EMPTY_LAST_OFFSET);

    let gap = state.rng.range(GAP_MIN, GAP_SPAN) as f32;
    let w = state.rng.range(WIDTH_MIN, WIDTH_SPAN) as f32;
    let h = state.rng.range(HEIGHT_MIN, HEIGHT_SPAN) as f32;
    let x = (last_x + gap).max(width + MIN_SPAWN_OFFSET);

    state.obstacles.push_back(Obstacle::on_floor(x, w, h, floor_y));
}

/// Append at most one obstacle if the lookahead policy asks for it.
/// Returns whether one was spawned.
pub fn ensure_lookahead(state: &mut GameState) -> bool {
    if needs_spawn(state) {
        spawn_obstacle(state);
        true
    } else {
        false
    }
}

/// Fill the buffer at run start using the same policy as per-tick spawning
pub fn populate(state: &mut GameState) {
    let mut spawned = 0;
    while spawned < MAX_POPULATE && ensure_lookahead(state) {
        spawned += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::RunPhase;
    use crate::tuning::Tuning;

    fn is_sorted(state: &GameState) -> bool {
        state
            .obstacles
            .iter()
            .zip(state.obstacles.iter().skip(1))
            .all(|(a, b)| a.x <= b.x)
    }

    #[test]
    fn test_populate_fills_lookahead() {
        let state = GameState::new(Tuning::default(), 12345);
        assert_eq!(state.obstacles.len(), 6);
        assert!(is_sorted(&state));
        assert_eq!(state.phase, RunPhase::Idle);
    }

    #[test]
    fn test_first_obstacle_position_from_seed() {
        let tuning = Tuning::default();
        let state = GameState::new(tuning, 12345);

        // Replay the draws by hand
        let mut rng = crate::sim::Lcg::new(12345);
        let gap = rng.range(160, 240) as f32;
        let w = rng.range(24, 90) as f32;
        let h = rng.range(24, 80) as f32;

        let first = state.obstacles[0];
        assert_eq!(first.x, tuning.screen_width + 100.0 + gap);
        assert_eq!(first.w, w);
        assert_eq!(first.h, h);
    }

    #[test]
    fn test_spawns_off_screen_right() {
        let state = GameState::new(Tuning::default(), 5);
        for ob in &state.obstacles {
            assert!(ob.x >= state.tuning.screen_width + 60.0);
        }
    }

    #[test]
    fn test_spawn_never_behind_last() {
        let mut state = GameState::new(Tuning::default(), 77);
        // Drag everything far left, then spawn
        for ob in state.obstacles.iter_mut() {
            ob.x -= 5000.0;
        }
        let last_x = state.obstacles.back().unwrap().x;
        spawn_obstacle(&mut state);
        let new_x = state.obstacles.back().unwrap().x;
        assert!(new_x > last_x);
        assert!(new_x >= state.tuning.screen_width + 60.0);
        assert!(is_sorted(&state));
    }

    #[test]
    fn test_full_buffer_far_right_needs_nothing() {
        let mut state = GameState::new(Tuning::default(), 3);
        assert!(!ensure_lookahead(&mut state));
        assert_eq!(state.obstacles.len(), 6);
    }

    #[test]
    fn test_newest_inside_margin_triggers_spawn() {
        let mut state = GameState::new(Tuning::default(), 3);
        let margin_x = state.tuning.screen_width - state.tuning.spawn_margin;
        if let Some(last) = state.obstacles.back_mut() {
            last.x = margin_x - 1.0;
        }
        assert!(ensure_lookahead(&mut state));
        assert_eq!(state.obstacles.len(), 7);
    }

    #[test]
    fn test_short_buffer_spawns_one_per_call() {
        let mut state = GameState::new(Tuning::default(), 3);
        state.obstacles.truncate(2);
        assert!(ensure_lookahead(&mut state));
        assert_eq!(state.obstacles.len(), 3);
    }

    #[test]
    fn test_same_seed_same_course() {
        let a = GameState::new(Tuning::default(), 2024);
        let b = GameState::new(Tuning::default(), 2024);
        assert_eq!(a.obstacles, b.obstacles);
        let c = GameState::new(Tuning::default(), 2025);
        assert_ne!(a.obstacles, c.obstacles);
    }
}
