//! Simulation configuration and quality presets
//!
//! A config is fixed for the lifetime of a session. Hosts build one from
//! defaults, a preset, or JSON, and hand it to [`crate::Simulation::new`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Particle population for this preset
    pub fn particle_count(&self) -> usize {
        match self {
            QualityPreset::Low => 120,
            QualityPreset::Medium => PARTICLE_COUNT,
            QualityPreset::High => 600,
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Population ===
    pub particle_count: usize,
    pub particle_radius: f32,

    // === Controlled body ===
    pub controlled_radius: f32,
    /// Drag radius = `drag_radius_scale * controlled_radius`
    pub drag_radius_scale: f32,

    // === Forces ===
    /// Particle-particle repulsion cutoff (exclusive)
    pub interaction_radius: f32,
    /// `k` in `k / d²`
    pub repulsion_strength: f32,
    /// Force per unit of controlled-body frame displacement
    pub coupling_strength: f32,

    // === Integration ===
    /// Per-frame velocity multiplier, in (0, 1]
    pub damping: f32,
    /// Speed cap in pixels per frame
    pub max_speed: f32,

    // === Collisions ===
    /// Particle vs controlled body, in [0, 1]
    pub body_restitution: f32,
    /// Particle vs arena edge, in [0, 1]
    pub boundary_restitution: f32,

    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Host ===
    /// Placement seed
    pub seed: u64,
    /// Nominal frames per second for the host scheduler
    pub frame_rate: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            particle_radius: PARTICLE_RADIUS,

            controlled_radius: CONTROLLED_RADIUS,
            drag_radius_scale: DRAG_RADIUS_SCALE,

            interaction_radius: INTERACTION_RADIUS,
            repulsion_strength: REPULSION_STRENGTH,
            coupling_strength: COUPLING_STRENGTH,

            damping: DAMPING,
            max_speed: MAX_SPEED,

            body_restitution: BODY_RESTITUTION,
            boundary_restitution: BOUNDARY_RESTITUTION,

            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            seed: DEFAULT_SEED,
            frame_rate: FRAME_RATE,
        }
    }
}

impl SimConfig {
    /// Create a config from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            particle_count: preset.particle_count(),
            ..Self::default()
        }
    }

    /// Radius around the controlled body inside which particles are dragged along
    #[inline]
    pub fn drag_radius(&self) -> f32 {
        self.drag_radius_scale * self.controlled_radius
    }

    /// Closest a particle center may sit to the controlled body center
    #[inline]
    pub fn contact_distance(&self) -> f32 {
        self.particle_radius + self.controlled_radius
    }

    /// Smallest arena extent that still leaves a particle-wide gap around a centered body
    #[inline]
    pub fn min_arena_extent(&self) -> f32 {
        2.0 * (self.controlled_radius + 2.0 * self.particle_radius)
    }

    /// Check every field against its numeric domain
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::NoParticles);
        }

        positive("particle_radius", self.particle_radius)?;
        positive("controlled_radius", self.controlled_radius)?;
        positive("interaction_radius", self.interaction_radius)?;
        positive("max_speed", self.max_speed)?;
        positive("arena_width", self.arena_width)?;
        positive("arena_height", self.arena_height)?;
        positive("frame_rate", self.frame_rate)?;

        non_negative("drag_radius_scale", self.drag_radius_scale)?;
        non_negative("repulsion_strength", self.repulsion_strength)?;
        non_negative("coupling_strength", self.coupling_strength)?;

        finite("damping", self.damping)?;
        if self.damping <= 0.0 || self.damping > 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "damping",
                value: self.damping,
                range: "(0, 1]",
            });
        }

        unit_interval("body_restitution", self.body_restitution)?;
        unit_interval("boundary_restitution", self.boundary_restitution)?;

        let min = self.min_arena_extent();
        if self.arena_width < min || self.arena_height < min {
            return Err(ConfigError::ArenaTooSmall {
                width: self.arena_width,
                height: self.arena_height,
                min,
            });
        }

        Ok(())
    }

    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a JSON config from disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            range: "[0, inf)",
        })
    }
}

fn unit_interval(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            range: "[0, 1]",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Simulation;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(SimConfig::from_preset(QualityPreset::Low).particle_count, 120);
        assert_eq!(SimConfig::from_preset(QualityPreset::High).particle_count, 600);
        assert_eq!(QualityPreset::parse("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
        assert!(SimConfig::from_preset(QualityPreset::High).validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_particles() {
        let config = SimConfig {
            particle_count: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoParticles)));
        assert_eq!(
            Simulation::new(config).map(|_| ()).unwrap_err().to_string(),
            "particle_count must be at least 1"
        );
    }

    #[test]
    fn test_rejects_bad_radii() {
        let config = SimConfig {
            particle_radius: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "particle_radius", value }) if value == -1.0
        ));

        let config = SimConfig {
            controlled_radius: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_damping_domain() {
        for damping in [0.0, -0.5, 1.01] {
            let config = SimConfig {
                damping,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::OutOfRange { field: "damping", .. })),
                "damping {damping} should be rejected"
            );
        }

        let config = SimConfig {
            damping: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_restitution_domain() {
        let config = SimConfig {
            body_restitution: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SimConfig {
            boundary_restitution: 0.0,
            body_restitution: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_nan() {
        let config = SimConfig {
            max_speed: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "max_speed" })
        ));
    }

    #[test]
    fn test_arena_too_small() {
        let config = SimConfig {
            arena_width: 60.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ArenaTooSmall { .. })));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json_str(r#"{ "particle_count": 42, "damping": 0.9 }"#)
            .expect("valid json");
        assert_eq!(config.particle_count, 42);
        assert_eq!(config.damping, 0.9);
        assert_eq!(config.controlled_radius, CONTROLLED_RADIUS);
    }

    #[test]
    fn test_json_roundtrip_and_errors() {
        let config = SimConfig::from_preset(QualityPreset::Low);
        let json = config.to_json().expect("serializes");
        assert_eq!(SimConfig::from_json_str(&json).expect("parses"), config);

        assert!(matches!(
            SimConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(SimConfig::from_json_str(r#"{ "damping": 2.0 }"#).is_err());
    }
}
