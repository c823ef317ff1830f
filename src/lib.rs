//! Drag Field - a pointer-driven 2D particle field
//!
//! Core modules:
//! - `sim`: Deterministic simulation (forces, collisions, per-frame step)
//! - `settings`: Session configuration and quality presets
//! - `error`: Configuration errors
//! - `platform`: Host adapters (frame scheduling, browser binding)

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{QualityPreset, SimConfig};
pub use sim::{Bodies, FieldStats, Simulation};

/// Simulation configuration defaults
pub mod consts {
    /// Arena dimensions (arena-local pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 500.0;

    /// Particle defaults
    pub const PARTICLE_COUNT: usize = 300;
    pub const PARTICLE_RADIUS: f32 = 3.0;

    /// Controlled body (the dragged obstacle)
    pub const CONTROLLED_RADIUS: f32 = 40.0;
    /// Drag radius as a multiple of the controlled body radius
    pub const DRAG_RADIUS_SCALE: f32 = 2.5;

    /// Particle-particle repulsion
    pub const INTERACTION_RADIUS: f32 = 20.0;
    pub const REPULSION_STRENGTH: f32 = 8.0;

    /// Fraction of the body's frame displacement handed to nearby particles
    pub const COUPLING_STRENGTH: f32 = 0.12;

    /// Per-frame velocity decay
    pub const DAMPING: f32 = 0.96;
    /// Maximum particle speed (pixels per frame)
    pub const MAX_SPEED: f32 = 12.0;

    /// Restitution for particle vs controlled body
    pub const BODY_RESTITUTION: f32 = 0.6;
    /// Restitution for particle vs arena edge
    pub const BOUNDARY_RESTITUTION: f32 = 0.5;

    /// Nominal host frame rate
    pub const FRAME_RATE: f32 = 60.0;
    /// Maximum catch-up frames per host callback to prevent spiral of death
    pub const MAX_FRAMES_PER_CALLBACK: u32 = 4;

    /// Default placement seed
    pub const DEFAULT_SEED: u64 = 0x5eed_f1e1d;
}
