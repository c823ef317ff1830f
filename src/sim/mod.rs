//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Unit frame steps only
//! - Seeded RNG only
//! - Stable iteration order (by particle index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod field;
pub mod state;
pub mod tick;
pub mod vector;

pub use collision::{
    CollisionResult, particle_body_collision, resolve_body_collision, resolve_boundary_collision,
};
pub use field::ParticleField;
pub use state::{Arena, Bodies, ControlledBody, FieldStats, Particle};
pub use tick::Simulation;
