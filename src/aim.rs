//! Aim trainer
//!
//! Shots travel along a 2D ray from the screen center through the click
//! point. Targets closest to the center are tested first and the first one
//! the ray passes within its radius takes the hit.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Magazine size
pub const MAX_AMMO: u32 = 30;
/// Round length (seconds)
pub const ROUND_SECONDS: f32 = 30.0;
/// Targets spawned when a round starts
pub const INITIAL_TARGETS: usize = 6;
/// Destroyed targets linger this long before removal (seconds)
const REMOVE_DELAY: f32 = 0.2;
/// Moving targets bounce off this inset from the side edges
const BOUNCE_INSET: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Static,
    Moving,
    Armored,
}

impl TargetKind {
    pub fn points(self) -> u32 {
        match self {
            TargetKind::Armored => 250,
            _ => 100,
        }
    }

    pub fn hit_points(self) -> u8 {
        match self {
            TargetKind::Armored => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub pos: Vec2,
    pub radius: f32,
    /// Horizontal speed (pixels/s), zero unless moving
    pub vx: f32,
    pub hp: u8,
    pub kind: TargetKind,
    /// Seconds until a destroyed target is removed; `None` while alive
    pub destroyed: Option<f32>,
}

impl Target {
    pub fn new(pos: Vec2, radius: f32, kind: TargetKind) -> Self {
        Self {
            pos,
            radius,
            vx: 0.0,
            hp: kind.hit_points(),
            kind,
            destroyed: None,
        }
    }

    pub fn is_live(&self) -> bool {
        self.destroyed.is_none()
    }
}

/// Index of the target hit by a shot from `center` toward `click`
///
/// Returns `None` for a zero-length ray or when every live target is missed.
pub fn hit_test(click: Vec2, center: Vec2, targets: &[Target]) -> Option<usize> {
    let dir = (click - center).try_normalize()?;

    let mut order: Vec<usize> = (0..targets.len()).filter(|&i| targets[i].is_live()).collect();
    order.sort_by(|&a, &b| {
        let da = targets[a].pos.distance(center);
        let db = targets[b].pos.distance(center);
        da.total_cmp(&db)
    });

    order.into_iter().find(|&i| {
        let t = &targets[i];
        let to_target = t.pos - center;
        let proj = to_target.dot(dir);
        if proj < 0.0 {
            return false;
        }
        let perp = to_target - dir * proj;
        perp.length_squared() <= t.radius * t.radius
    })
}

/// What a click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// No round in progress
    Inactive,
    /// Magazine empty, reload first
    Empty,
    /// Round fired at the exact center; no direction
    NoDirection,
    Missed,
    Hit {
        index: usize,
        points: u32,
        destroyed: bool,
    },
}

/// End-of-round summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    pub score: u32,
    /// Percent of shots that hit, rounded
    pub accuracy: u32,
}

/// One timed round of the trainer
#[derive(Debug, Clone)]
pub struct AimRound {
    pub size: Vec2,
    pub targets: Vec<Target>,
    pub ammo: u32,
    pub score: u32,
    pub shots: u32,
    pub hits: u32,
    /// Seconds left in the round
    pub timer: f32,
    active: bool,
    spawn_timer: f32,
    rng: Pcg32,
}

impl AimRound {
    /// Idle trainer showing a handful of targets
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let mut round = Self {
            size: Vec2::new(width, height),
            targets: Vec::new(),
            ammo: MAX_AMMO,
            score: 0,
            shots: 0,
            hits: 0,
            timer: ROUND_SECONDS,
            active: false,
            spawn_timer: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        };
        round.bulk_spawn(INITIAL_TARGETS);
        round
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn center(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Begin a fresh round
    pub fn start(&mut self) {
        self.ammo = MAX_AMMO;
        self.score = 0;
        self.timer = ROUND_SECONDS;
        self.shots = 0;
        self.hits = 0;
        self.spawn_timer = 0.0;
        self.targets.clear();
        self.bulk_spawn(INITIAL_TARGETS);
        self.active = true;
        log::info!("Aim round started");
    }

    pub fn reload(&mut self) {
        self.ammo = MAX_AMMO;
    }

    /// Whole seconds shown on the HUD
    pub fn seconds_left(&self) -> u32 {
        self.timer.max(0.0).ceil() as u32
    }

    pub fn accuracy(&self) -> u32 {
        if self.shots == 0 {
            0
        } else {
            ((self.hits as f32 / self.shots as f32) * 100.0).round() as u32
        }
    }

    /// Fire at `click` (canvas-local coordinates)
    pub fn shoot(&mut self, click: Vec2) -> ShotOutcome {
        if !self.active {
            return ShotOutcome::Inactive;
        }
        if self.ammo == 0 {
            return ShotOutcome::Empty;
        }
        self.ammo -= 1;
        self.shots += 1;

        let center = self.center();
        if click == center {
            return ShotOutcome::NoDirection;
        }

        let Some(index) = hit_test(click, center, &self.targets) else {
            return ShotOutcome::Missed;
        };

        let target = &mut self.targets[index];
        target.hp = target.hp.saturating_sub(1);
        let points = target.kind.points();
        let destroyed = target.hp == 0;
        if destroyed {
            target.destroyed = Some(REMOVE_DELAY);
        }
        self.hits += 1;
        self.score += points;

        ShotOutcome::Hit {
            index,
            points,
            destroyed,
        }
    }

    /// Advance the round; returns the summary when time runs out
    pub fn update(&mut self, dt: f32) -> Option<RoundSummary> {
        if !self.active {
            return None;
        }

        self.timer -= dt;
        self.spawn_timer -= dt;
        if self.spawn_timer <= 0.0 {
            let count = 1 + (self.rng.random::<f32>() * 2.0).floor() as usize;
            self.bulk_spawn(count);
            self.spawn_timer = 0.8 + self.rng.random::<f32>() * 1.2;
        }

        let right = self.size.x - BOUNCE_INSET;
        for t in self.targets.iter_mut() {
            t.pos.x += t.vx * dt;
            if t.pos.x < BOUNCE_INSET {
                t.vx = t.vx.abs();
            }
            if t.pos.x > right {
                t.vx = -t.vx.abs();
            }
            if let Some(left) = t.destroyed.as_mut() {
                *left -= dt;
            }
        }
        self.targets
            .retain(|t| t.destroyed.is_none_or(|left| left > 0.0));

        if self.timer <= 0.0 {
            self.active = false;
            let summary = RoundSummary {
                score: self.score,
                accuracy: self.accuracy(),
            };
            log::info!(
                "Aim round ended: score {} accuracy {}%",
                summary.score,
                summary.accuracy
            );
            return Some(summary);
        }
        None
    }

    fn between(&mut self, a: f32, b: f32) -> f32 {
        a + self.rng.random::<f32>() * (b - a)
    }

    fn spawn_target(&mut self, kind: TargetKind) {
        let x = self.between(140.0, self.size.x - 140.0);
        let y = self.between(80.0, self.size.y - 80.0);
        let radius = self.between(14.0, 28.0);
        let mut target = Target::new(Vec2::new(x, y), radius, kind);
        if kind == TargetKind::Moving {
            target.vx = self.between(-80.0, 80.0);
        }
        self.targets.push(target);
    }

    fn bulk_spawn(&mut self, count: usize) {
        for _ in 0..count {
            let kind = if self.rng.random::<f32>() > 0.8 {
                TargetKind::Armored
            } else if self.rng.random::<f32>() > 0.6 {
                TargetKind::Moving
            } else {
                TargetKind::Static
            };
            self.spawn_target(kind);
        }
    }
}
