//! Collision detection and response
//!
//! Two shape pairs only: particle vs the controlled disc, and particle vs the
//! arena edges. Both resolve penetration in a single step.

use glam::Vec2;

use super::state::{Arena, ControlledBody, Particle};
use super::vector::{normal_speed, separation};

/// Result of a collision check
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit normal pointing from the obstacle toward the particle
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between a particle and the controlled body.
///
/// When the centers coincide the normal falls back to the body's direction of
/// motion, then to `+x`.
pub fn particle_body_collision(
    particle_pos: Vec2,
    particle_radius: f32,
    body: &ControlledBody,
) -> CollisionResult {
    let contact = particle_radius + body.radius;

    match separation(body.pos, particle_pos) {
        Some((_, dist)) if dist >= contact => CollisionResult::miss(),
        Some((normal, dist)) => CollisionResult {
            hit: true,
            normal,
            penetration: contact - dist,
        },
        None => {
            let normal = body.effective_velocity().try_normalize().unwrap_or(Vec2::X);
            CollisionResult {
                hit: true,
                normal,
                penetration: contact,
            }
        }
    }
}

/// Push a particle out of the controlled body and bounce it.
///
/// The body is kinematic (infinite mass), so the whole impulse goes to the
/// particle. Separating contacts only get the position fix. Returns whether
/// a contact was resolved.
pub fn resolve_body_collision(
    particle: &mut Particle,
    particle_radius: f32,
    body: &ControlledBody,
    restitution: f32,
) -> bool {
    let result = particle_body_collision(particle.pos, particle_radius, body);
    if !result.hit {
        return false;
    }

    // Land exactly on the contact circle
    particle.pos = body.pos + result.normal * (particle_radius + body.radius);

    let relative = particle.vel - body.effective_velocity();
    let approach = normal_speed(relative, result.normal);
    if approach < 0.0 {
        particle.vel -= (1.0 + restitution) * approach * result.normal;
    }

    true
}

/// Keep a particle's disc inside the arena.
///
/// Axes are handled independently: clamp the position, then reflect and damp
/// the velocity component if it still points out of the arena. Returns
/// whether any edge was touched.
pub fn resolve_boundary_collision(
    particle: &mut Particle,
    particle_radius: f32,
    arena: &Arena,
    restitution: f32,
) -> bool {
    let (min, max) = arena.inset(particle_radius);
    let hit_x = contain_axis(&mut particle.pos.x, &mut particle.vel.x, min.x, max.x, restitution);
    let hit_y = contain_axis(&mut particle.pos.y, &mut particle.vel.y, min.y, max.y, restitution);
    hit_x || hit_y
}

fn contain_axis(pos: &mut f32, vel: &mut f32, min: f32, max: f32, restitution: f32) -> bool {
    if *pos < min {
        *pos = min;
        if *vel < 0.0 {
            *vel = -*vel * restitution;
        }
        true
    } else if *pos > max {
        *pos = max;
        if *vel > 0.0 {
            *vel = -*vel * restitution;
        }
        true
    } else {
        false
    }
}
