//! Configuration error types
//!
//! The engine only fails at construction; everything that goes wrong during a
//! step is absorbed so the visualization keeps running.

use thiserror::Error;

/// Errors reported when building a simulation or loading its config
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A field needs at least one particle to simulate
    #[error("particle_count must be at least 1")]
    NoParticles,

    /// A radius, rate or dimension that must be strictly positive
    #[error("{field} must be positive, got {value}")]
    NonPositive {
        /// Config field name
        field: &'static str,
        /// Offending value
        value: f32,
    },

    /// A factor outside its numeric domain
    #[error("{field} = {value} is outside {range}")]
    OutOfRange {
        /// Config field name
        field: &'static str,
        /// Offending value
        value: f32,
        /// Human-readable valid range
        range: &'static str,
    },

    /// NaN or infinity in a config field
    #[error("{field} is not finite")]
    NotFinite {
        /// Config field name
        field: &'static str,
    },

    /// Arena cannot hold the controlled body with room for a particle on each side
    #[error("arena {width}x{height} is too small, need at least {min}x{min}")]
    ArenaTooSmall {
        /// Arena width
        width: f32,
        /// Arena height
        height: f32,
        /// Minimum extent on both axes
        min: f32,
    },

    /// Explicit particle layout does not match `particle_count`
    #[error("expected {expected} particle positions, got {got}")]
    ParticleCountMismatch {
        /// Configured particle count
        expected: usize,
        /// Number of positions supplied
        got: usize,
    },

    /// Explicit particle position is NaN/infinite or outside the arena
    #[error("particle {index} at ({x}, {y}) is outside the arena")]
    ParticleOutsideArena {
        /// Particle index in the supplied layout
        index: usize,
        /// X coordinate
        x: f32,
        /// Y coordinate
        y: f32,
    },

    /// Malformed JSON config
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Config file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}
