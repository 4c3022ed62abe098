//! Collision detection for axis-aligned boxes
//!
//! The player only moves vertically, so tunneling can only happen along y.
//! `sweeps` samples the vertical travel of one tick in sub-steps no larger
//! than half the player's height and tests box overlap at each sample.

use glam::Vec2;

use super::state::{Obstacle, Player};

/// Axis-aligned box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap; boxes that only touch along an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Number of samples for a vertical travel of `vy * dt`, never zero
pub fn sweep_steps(vy: f32, dt: f32, height: f32) -> u32 {
    let travel = (vy * dt).abs();
    let half = height / 2.0;
    if half.is_nan() || half <= 0.0 || !travel.is_finite() {
        return 1;
    }
    ((travel / half).ceil() as u32).max(1)
}

/// Sampled sweep of the player's vertical travel this tick against one obstacle
///
/// Samples `y + vy * dt * t` for `t = 1/steps ..= 1`; any overlapping sample is a hit.
pub fn sweeps(player: &Player, obstacle: &Obstacle, dt: f32) -> bool {
    let steps = sweep_steps(player.vy, dt, player.size.y);
    let travel = player.vy * dt;
    let target = obstacle.aabb();

    (1..=steps).any(|s| {
        let t = s as f32 / steps as f32;
        player.aabb_at(player.pos.y + travel * t).overlaps(&target)
    })
}
