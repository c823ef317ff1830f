//! Simulation entities and read-only snapshots
//!
//! Everything a frame mutates lives here: the free particles, the
//! pointer-driven body and the arena they are contained in.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A free-floating fluid element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Particle {
    /// A particle at rest
    pub fn at_rest(pos: Vec2) -> Self {
        Self { pos, vel: Vec2::ZERO }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// The pointer-driven disc.
///
/// Kinematic: only [`ControlledBody::move_to`] changes its position, forces
/// never do. Its velocity is the displacement over the last frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlledBody {
    pub pos: Vec2,
    pub radius: f32,
    /// Position at the start of the current frame
    prev_pos: Vec2,
}

impl ControlledBody {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            prev_pos: pos,
        }
    }

    /// Start a frame: remember where the body was, then jump to `target` if
    /// there is one. Without a target the body stays put and its effective
    /// velocity drops to zero.
    pub fn move_to(&mut self, target: Option<Vec2>) {
        self.prev_pos = self.pos;
        if let Some(target) = target {
            self.pos = target;
        }
    }

    /// Displacement since the previous frame
    #[inline]
    pub fn effective_velocity(&self) -> Vec2 {
        self.pos - self.prev_pos
    }
}

/// Axis-aligned arena `[0, width] × [0, height]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }

    /// Box that keeps a disc of `radius` fully inside the arena
    pub fn inset(&self, radius: f32) -> (Vec2, Vec2) {
        (
            Vec2::splat(radius),
            Vec2::new(self.width - radius, self.height - radius),
        )
    }

    /// Clamp `p` into the box that keeps a disc of `radius` inside the arena
    pub fn clamp_inset(&self, p: Vec2, radius: f32) -> Vec2 {
        let (min, max) = self.inset(radius);
        p.clamp(min, max)
    }

    /// Inclusive containment test on the raw arena bounds
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// Read-only snapshot handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bodies {
    pub particles: Vec<Vec2>,
    pub controlled: Vec2,
}

/// Aggregate motion figures for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    /// Completed frames
    pub frame: u64,
    /// Sum of `|v|² / 2` over particles (unit mass)
    pub kinetic_energy: f32,
    pub mean_speed: f32,
    pub peak_speed: f32,
    /// Controlled-body contacts resolved in the last frame
    pub contacts: usize,
}

impl FieldStats {
    pub fn from_particles(particles: &[Particle], frame: u64, contacts: usize) -> Self {
        let mut kinetic_energy = 0.0;
        let mut speed_sum = 0.0;
        let mut peak_speed: f32 = 0.0;

        for p in particles {
            let speed = p.speed();
            kinetic_energy += 0.5 * speed * speed;
            speed_sum += speed;
            peak_speed = peak_speed.max(speed);
        }

        let mean_speed = if particles.is_empty() {
            0.0
        } else {
            speed_sum / particles.len() as f32
        };

        Self {
            frame,
            kinetic_energy,
            mean_speed,
            peak_speed,
            contacts,
        }
    }
}
