//! Particle field: the free bodies and the forces acting on them
//!
//! Two force sources feed one per-particle accumulator each frame:
//! - short-range pairwise repulsion `k / d²` (exhaustive O(n²) pair scan)
//! - drag coupling from the controlled body's motion
//!
//! The pair scan is fine for a few hundred particles. Thousands would need a
//! grid or bucket index to stay sub-quadratic.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use super::state::{Arena, ControlledBody, Particle};
use super::vector::limit_speed;

/// Placement attempts per particle before falling back to the body's rim
const MAX_PLACEMENT_ATTEMPTS: u32 = 64;

/// The particle population plus its force accumulator
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
    forces: Vec<Vec2>,
}

impl ParticleField {
    pub fn new(particles: Vec<Particle>) -> Self {
        let forces = vec![Vec2::ZERO; particles.len()];
        Self { particles, forces }
    }

    /// Scatter `count` resting particles uniformly over the arena, keeping
    /// clear of the controlled body.
    pub fn scatter(
        count: usize,
        particle_radius: f32,
        arena: &Arena,
        body: &ControlledBody,
        rng: &mut Pcg32,
    ) -> Self {
        let (min, max) = arena.inset(particle_radius);
        let clearance = body.radius + particle_radius;

        let particles = (0..count)
            .map(|_| {
                for _ in 0..MAX_PLACEMENT_ATTEMPTS {
                    let pos = Vec2::new(
                        rng.random_range(min.x..=max.x),
                        rng.random_range(min.y..=max.y),
                    );
                    if pos.distance(body.pos) >= clearance {
                        return Particle::at_rest(pos);
                    }
                }
                // Crowded arena: park the particle on the body's rim
                let angle = rng.random_range(0.0..TAU);
                let rim = body.pos + Vec2::from_angle(angle) * clearance;
                Particle::at_rest(arena.clamp_inset(rim, particle_radius))
            })
            .collect();

        Self::new(particles)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Forces accumulated so far this frame
    pub fn forces(&self) -> &[Vec2] {
        &self.forces
    }

    pub fn clear_forces(&mut self) {
        self.forces.fill(Vec2::ZERO);
    }

    /// Add pairwise repulsion for every pair closer than `radius` (exclusive).
    ///
    /// Coincident pairs are skipped. Returns the number of interacting pairs.
    pub fn apply_repulsion(&mut self, radius: f32, strength: f32) -> usize {
        let n = self.particles.len();
        let radius_sq = radius * radius;
        let mut pairs = 0;

        for i in 0..n {
            let pi = self.particles[i].pos;
            for j in (i + 1)..n {
                let delta = pi - self.particles[j].pos;
                let dist_sq = delta.length_squared();
                if dist_sq <= 0.0 || dist_sq >= radius_sq {
                    continue;
                }

                let dist = dist_sq.sqrt();
                // Pushes i away from j; j gets the opposite
                let force = delta / dist * (strength / dist_sq);
                self.forces[i] += force;
                self.forces[j] -= force;
                pairs += 1;
            }
        }

        pairs
    }

    /// Drag particles within `drag_radius` of the body along with its motion.
    ///
    /// Returns the number of particles affected.
    pub fn apply_coupling(&mut self, body: &ControlledBody, drag_radius: f32, strength: f32) -> usize {
        let body_vel = body.effective_velocity();
        if body_vel == Vec2::ZERO {
            return 0;
        }

        let push = body_vel * strength;
        let drag_radius_sq = drag_radius * drag_radius;
        let mut dragged = 0;

        for (particle, force) in self.particles.iter().zip(self.forces.iter_mut()) {
            if particle.pos.distance_squared(body.pos) < drag_radius_sq {
                *force += push;
                dragged += 1;
            }
        }

        dragged
    }

    /// Fold the accumulated force into velocity, damp, then cap speed
    pub fn integrate_velocities(&mut self, damping: f32, max_speed: f32) {
        for (particle, force) in self.particles.iter_mut().zip(&self.forces) {
            particle.vel = limit_speed((particle.vel + *force) * damping, max_speed);
        }
    }

    /// Move every particle by its velocity (one unit frame)
    pub fn advance_positions(&mut self) {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
        }
    }

    /// Re-apply the speed cap
    pub fn limit_speeds(&mut self, max_speed: f32) {
        for particle in &mut self.particles {
            particle.vel = limit_speed(particle.vel, max_speed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn field_at(points: &[Vec2]) -> ParticleField {
        ParticleField::new(points.iter().copied().map(Particle::at_rest).collect())
    }

    #[test]
    fn test_repulsion_is_equal_and_opposite() {
        let mut field = field_at(&[Vec2::new(10.0, 10.0), Vec2::new(14.0, 13.0)]);
        let pairs = field.apply_repulsion(20.0, 25.0);
        assert_eq!(pairs, 1);

        let f = field.forces();
        assert!((f[0] + f[1]).length() < 1e-6);
        // |F| = k / d² = 25 / 25
        assert!((f[0].length() - 1.0).abs() < 1e-5);
        // Particle 0 pushed away from particle 1
        assert!(f[0].dot(Vec2::new(4.0, 3.0)) < 0.0);
    }

    #[test]
    fn test_repulsion_boundary_is_exclusive() {
        let mut field = field_at(&[Vec2::new(100.0, 100.0), Vec2::new(120.0, 100.0)]);
        assert_eq!(field.apply_repulsion(20.0, 10.0), 0);
        assert!(field.forces().iter().all(|f| *f == Vec2::ZERO));
    }

    #[test]
    fn test_repulsion_ignores_coincident_pair() {
        let mut field = field_at(&[Vec2::new(50.0, 50.0), Vec2::new(50.0, 50.0)]);
        assert_eq!(field.apply_repulsion(20.0, 10.0), 0);
        assert!(field.forces().iter().all(|f| f.is_finite() && *f == Vec2::ZERO));
    }

    #[test]
    fn test_coupling_only_within_drag_radius() {
        let mut body = ControlledBody::new(Vec2::new(100.0, 100.0), 10.0);
        body.move_to(Some(Vec2::new(104.0, 100.0)));

        let mut field = field_at(&[Vec2::new(120.0, 100.0), Vec2::new(200.0, 100.0)]);
        let dragged = field.apply_coupling(&body, 25.0, 0.5);
        assert_eq!(dragged, 1);
        assert_eq!(field.forces()[0], Vec2::new(2.0, 0.0));
        assert_eq!(field.forces()[1], Vec2::ZERO);
    }

    #[test]
    fn test_coupling_boundary_is_exclusive() {
        let mut body = ControlledBody::new(Vec2::new(100.0, 100.0), 10.0);
        body.move_to(Some(Vec2::new(100.0, 104.0)));

        // Exactly 25 from the body's new center, then just inside
        let mut field = field_at(&[Vec2::new(125.0, 104.0), Vec2::new(124.9, 104.0)]);
        assert_eq!(field.apply_coupling(&body, 25.0, 0.5), 1);
        assert_eq!(field.forces()[0], Vec2::ZERO);
        assert_eq!(field.forces()[1], Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_coupling_ignores_particle_velocity() {
        let mut body = ControlledBody::new(Vec2::new(0.0, 0.0), 10.0);
        body.move_to(Some(Vec2::new(0.0, 3.0)));

        let mut field = ParticleField::new(vec![
            Particle { pos: Vec2::new(5.0, 0.0), vel: Vec2::new(-9.0, 4.0) },
            Particle::at_rest(Vec2::new(-5.0, 0.0)),
        ]);
        field.apply_coupling(&body, 20.0, 1.0);
        assert_eq!(field.forces()[0], field.forces()[1]);
    }

    #[test]
    fn test_integration_damps_and_caps() {
        let mut field = field_at(&[Vec2::ZERO, Vec2::new(50.0, 0.0)]);
        field.forces[0] = Vec2::new(2.0, 0.0);
        field.forces[1] = Vec2::new(0.0, 100.0);
        field.integrate_velocities(0.5, 10.0);

        assert_eq!(field.particles()[0].vel, Vec2::new(1.0, 0.0));
        assert!((field.particles()[1].vel - Vec2::new(0.0, 10.0)).length() < 1e-5);

        field.advance_positions();
        assert_eq!(field.particles()[0].pos, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_scatter_is_seeded_and_clear_of_body() {
        let arena = Arena::new(400.0, 300.0);
        let body = ControlledBody::new(arena.center(), 40.0);

        let a = ParticleField::scatter(200, 3.0, &arena, &body, &mut Pcg32::seed_from_u64(7));
        let b = ParticleField::scatter(200, 3.0, &arena, &body, &mut Pcg32::seed_from_u64(7));
        assert_eq!(a.particles(), b.particles());
        assert_eq!(a.len(), 200);

        for p in a.particles() {
            assert!(p.pos.distance(body.pos) >= 43.0 - 1e-3);
            assert!(p.pos.x >= 3.0 && p.pos.x <= 397.0);
            assert!(p.pos.y >= 3.0 && p.pos.y <= 297.0);
            assert_eq!(p.vel, Vec2::ZERO);
        }
    }
}
