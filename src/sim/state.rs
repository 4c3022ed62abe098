//! Game state and core simulation types
//!
//! Everything the simulator mutates lives in `GameState`; renderers and the
//! HUD only read it between ticks.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::rng::Lcg;
use super::spawn;
use crate::consts::MAX_PARTICLES;
use crate::tuning::Tuning;

/// Run lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// World initialized, simulator not ticking yet
    Idle,
    /// Simulator ticking
    Running,
    /// Run ended by a collision; ticks are no-ops until reset
    GameOver,
}

/// The player box. Only `y` moves; the world scrolls past a fixed `x`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vy: f32,
    /// Resting y of the top edge
    pub ground_y: f32,
    pub on_ground: bool,
    /// Seconds left in which a jump is accepted after leaving the ground
    pub coyote: f32,
    /// Seconds left in which a buffered jump press is honored
    pub jump_buffer: f32,
    pub jump_power: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.ground_y()),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            vy: 0.0,
            ground_y: tuning.ground_y(),
            on_ground: true,
            coyote: 0.0,
            jump_buffer: 0.0,
            jump_power: tuning.jump_power,
        }
    }

    pub fn aabb(&self) -> Aabb {
        self.aabb_at(self.pos.y)
    }

    /// Player box with its top edge moved to `y`
    pub fn aabb_at(&self, y: f32) -> Aabb {
        Aabb::new(self.pos.x, y, self.size.x, self.size.y)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Bottom-center point
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x * 0.5, self.pos.y + self.size.y)
    }
}

/// A ground-standing block scrolling toward the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    /// Top edge; base sits on the ground line
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Obstacle {
    /// Obstacle of the given size standing on `floor_y`
    pub fn on_floor(x: f32, w: f32, h: f32, floor_y: f32) -> Self {
        Self {
            x,
            y: floor_y - h,
            w,
            h,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.w, self.h)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds remaining
    pub life: f32,
}

fn cosmetic_rng(seed: i64) -> Pcg32 {
    Pcg32::seed_from_u64((seed as u64) ^ 0x9E37_79B9_7F4A_7C15)
}

fn default_cosmetic_rng() -> Pcg32 {
    cosmetic_rng(0)
}

/// Complete world state for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    /// Seed the run was created from (reused by restart)
    pub seed: i64,
    /// Gameplay RNG (obstacle layout)
    pub rng: Lcg,
    pub player: Player,
    /// Pending obstacles, ascending x (nearest first)
    pub obstacles: VecDeque<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub score: u64,
    /// Scroll speed multiplier, grows with every cleared obstacle
    pub speed_scale: f32,
    pub phase: RunPhase,
    /// Shake magnitude requested by the last death (pixels)
    pub camera_shake: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Particle randomness, kept apart from `rng` so effects never shift the layout
    #[serde(skip, default = "default_cosmetic_rng")]
    effects_rng: Pcg32,
}

impl GameState {
    /// Fresh run: player grounded, lookahead obstacles spawned, phase Idle
    pub fn new(tuning: Tuning, seed: i64) -> Self {
        let mut state = Self {
            tuning,
            seed,
            rng: Lcg::new(seed),
            player: Player::new(&tuning),
            obstacles: VecDeque::new(),
            particles: Vec::new(),
            score: 0,
            speed_scale: 1.0,
            phase: RunPhase::Idle,
            camera_shake: 0.0,
            time_ticks: 0,
            effects_rng: cosmetic_rng(seed),
        };

        spawn::populate(&mut state);

        state
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == RunPhase::GameOver
    }

    /// Current scroll speed (pixels/s)
    pub fn scroll_speed(&self) -> f32 {
        self.tuning.base_speed * self.speed_scale
    }

    /// Burst of `count` particles at `origin`, capped at `MAX_PARTICLES` live
    pub fn emit_particles(&mut self, origin: Vec2, count: usize) {
        let room = MAX_PARTICLES.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let vx = self.effects_rng.random_range(-150.0..150.0);
            let vy = -self.effects_rng.random::<f32>() * 300.0;
            let life = 0.6 + self.effects_rng.random::<f32>() * 0.8;
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(vx, vy),
                life,
            });
        }
    }

    /// Move particles and drop expired ones
    pub fn update_particles(&mut self, dt: f32) {
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel * dt;
            particle.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}
