//! Rendering module
//!
//! `SceneRenderer` turns a read-only view of the world into a triangle list.
//! On wasm32, `WebGlPresenter` uploads that list and draws it.

pub mod shapes;
pub mod vertex;
#[cfg(target_arch = "wasm32")]
pub mod webgl;

pub use vertex::{Vertex, as_bytes, colors};
#[cfg(target_arch = "wasm32")]
pub use webgl::WebGlPresenter;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{GameState, RunPhase};

/// Corner radius of players and obstacles
const CORNER_RADIUS: f32 = 8.0;
/// Particle quad size
const PARTICLE_SIZE: f32 = 3.0;
/// Shake lost per rendered frame (pixels)
const SHAKE_DECAY: f32 = 0.8;
/// Score panel in the top-left corner
const HUD_PANEL_MIN: Vec2 = Vec2::new(8.0, 8.0);
const HUD_PANEL_SIZE: Vec2 = Vec2::new(140.0, 34.0);

/// Horizontal camera shake, started when a run ends
#[derive(Debug, Clone)]
pub struct CameraShake {
    magnitude: f32,
    rng: Pcg32,
}

impl CameraShake {
    pub fn new(seed: u64) -> Self {
        Self {
            magnitude: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    pub fn kick(&mut self, magnitude: f32) {
        self.magnitude = self.magnitude.max(magnitude);
    }

    pub fn stop(&mut self) {
        self.magnitude = 0.0;
    }

    /// Offset for this frame in [-m/2, m/2), then decay
    pub fn next_offset(&mut self) -> f32 {
        if self.magnitude <= 0.0 {
            return 0.0;
        }
        let m = self.magnitude;
        let offset = self.rng.random::<f32>() * m - m / 2.0;
        self.magnitude = (m - SHAKE_DECAY).max(0.0);
        offset
    }
}

/// Builds the per-frame triangle list from the world state
#[derive(Debug, Clone)]
pub struct SceneRenderer {
    shake: CameraShake,
    last_phase: RunPhase,
    vertices: Vec<Vertex>,
}

impl SceneRenderer {
    pub fn new(seed: u64) -> Self {
        Self {
            shake: CameraShake::new(seed),
            last_phase: RunPhase::Idle,
            vertices: Vec::with_capacity(1024),
        }
    }

    pub fn shake(&self) -> &CameraShake {
        &self.shake
    }

    /// Tessellate the world for this frame
    pub fn build(&mut self, state: &GameState) -> &[Vertex] {
        self.observe_phase(state);

        let tuning = &state.tuning;
        let screen = Vec2::new(tuning.screen_width, tuning.screen_height);
        let floor_y = tuning.floor_y();
        let out = &mut self.vertices;
        out.clear();

        shapes::vertical_gradient(out, Vec2::ZERO, screen, colors::SKY_TOP, colors::SKY_BOTTOM);
        shapes::rect(
            out,
            Vec2::new(0.0, floor_y),
            Vec2::new(screen.x, (screen.y - floor_y).max(0.0)),
            colors::GROUND,
        );

        for ob in &state.obstacles {
            shapes::rounded_rect(
                out,
                Vec2::new(ob.x, ob.y),
                Vec2::new(ob.w, ob.h),
                CORNER_RADIUS,
                colors::OBSTACLE,
            );
        }

        let player = &state.player;
        shapes::rounded_rect(out, player.pos, player.size, CORNER_RADIUS, colors::PLAYER);

        for p in &state.particles {
            let color = shapes::with_alpha(colors::PARTICLE, p.life);
            shapes::rect(out, p.pos, Vec2::splat(PARTICLE_SIZE), color);
        }

        shapes::rect(out, HUD_PANEL_MIN, HUD_PANEL_SIZE, colors::HUD_PANEL);

        if state.phase == RunPhase::GameOver {
            shapes::rect(out, Vec2::ZERO, screen, colors::GAME_OVER_VEIL);
        }

        let dx = self.shake.next_offset();
        if dx != 0.0 {
            for v in out.iter_mut() {
                v.position[0] += dx;
            }
        }

        &self.vertices
    }

    fn observe_phase(&mut self, state: &GameState) {
        match (self.last_phase, state.phase) {
            (prev, RunPhase::GameOver) if prev != RunPhase::GameOver => {
                self.shake.kick(state.camera_shake);
            }
            (RunPhase::GameOver, phase) if phase != RunPhase::GameOver => {
                self.shake.stop();
            }
            _ => {}
        }
        self.last_phase = state.phase;
    }
}
