//! Game balance and feel constants
//!
//! Every gameplay literal lives here so a run can be retuned from JSON
//! without touching the simulation. Persisted in LocalStorage on wasm32.

use serde::{Deserialize, Serialize};

/// Physics, spawning and scoring parameters for one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    /// Logical screen width (pixels)
    pub screen_width: f32,
    /// Logical screen height (pixels)
    pub screen_height: f32,
    /// Distance from the bottom of the screen to the player's resting top edge
    pub ground_offset: f32,

    // === Player ===
    /// Fixed horizontal position of the player's left edge
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Initial vertical velocity of a jump (negative is up)
    pub jump_power: f32,

    // === Physics ===
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Terminal fall speed (pixels/s)
    pub max_fall_speed: f32,
    /// Velocity multiplier applied each tick while ascending with jump released
    pub jump_cut: f32,
    /// Grace period after leaving the ground during which a jump is still accepted
    pub coyote_time: f32,
    /// How long an early jump press is remembered
    pub jump_buffer_time: f32,

    // === World scroll ===
    /// Obstacle scroll speed at speed scale 1.0 (pixels/s)
    pub base_speed: f32,
    /// Speed scale added for each cleared obstacle
    pub speed_step: f32,
    /// Score awarded for each cleared obstacle
    pub score_per_obstacle: u64,

    // === Spawning ===
    /// Minimum number of pending obstacles
    pub lookahead_count: usize,
    /// Spawn once the newest obstacle is this far inside the right edge
    pub spawn_margin: f32,
    /// Obstacles whose right edge passes this x are removed and scored
    pub despawn_x: f32,

    // === Effects ===
    pub jump_particles: usize,
    pub death_particles: usize,
    /// Camera shake magnitude on death (pixels)
    pub death_shake: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: 960.0,
            screen_height: 420.0,
            ground_offset: 72.0,

            player_x: 140.0,
            player_width: 36.0,
            player_height: 36.0,
            jump_power: -820.0,

            gravity: 2200.0,
            max_fall_speed: 1800.0,
            jump_cut: 0.55,
            coyote_time: 0.12,
            jump_buffer_time: 0.12,

            base_speed: 320.0,
            speed_step: 0.01,
            score_per_obstacle: 10,

            lookahead_count: 6,
            spawn_margin: 160.0,
            despawn_x: -80.0,

            jump_particles: 12,
            death_particles: 40,
            death_shake: 18.0,
        }
    }
}

impl Tuning {
    /// LocalStorage key (used only in wasm32)
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "pulse_tuning";

    /// Resting y of the player's top edge
    pub fn ground_y(&self) -> f32 {
        self.screen_height - self.ground_offset
    }

    /// y of the ground line (player's feet when grounded)
    pub fn floor_y(&self) -> f32 {
        self.ground_y() + self.player_height
    }

    /// Parse tuning from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Natively the defaults apply
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
