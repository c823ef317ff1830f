//! Per-frame simulation step
//!
//! A [`Simulation`] owns all engine state. Hosts talk to it through four
//! calls only: construct it, `set_pointer`, `step`, and read `bodies`.
//! Frames are unit steps, so the same inputs give the same positions at any
//! display rate.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{resolve_body_collision, resolve_boundary_collision};
use super::field::ParticleField;
use super::state::{Arena, Bodies, ControlledBody, FieldStats, Particle};
use super::vector::is_finite;
use crate::error::ConfigError;
use crate::settings::SimConfig;

/// One simulation session
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    arena: Arena,
    body: ControlledBody,
    field: ParticleField,
    /// Layout restored by [`Simulation::reset`]
    initial: Vec<Particle>,
    /// Latest pointer sample (arena-local)
    pointer: Option<Vec2>,
    frame: u64,
    /// Body contacts resolved in the last frame
    contacts: usize,
}

impl Simulation {
    /// Build a session with a seeded random particle layout
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let arena = Arena::new(config.arena_width, config.arena_height);
        let body = ControlledBody::new(arena.center(), config.controlled_radius);
        let mut rng = Pcg32::seed_from_u64(config.seed);
        let field = ParticleField::scatter(
            config.particle_count,
            config.particle_radius,
            &arena,
            &body,
            &mut rng,
        );

        log::info!(
            "Simulation initialized: {} particles in {}x{} arena (seed {})",
            field.len(),
            arena.width,
            arena.height,
            config.seed
        );

        Ok(Self::assemble(config, arena, body, field))
    }

    /// Build a session from an explicit particle layout.
    ///
    /// `positions` must hold exactly `particle_count` finite points inside
    /// the arena. Particles start at rest.
    pub fn with_particles(config: SimConfig, positions: &[Vec2]) -> Result<Self, ConfigError> {
        config.validate()?;

        if positions.len() != config.particle_count {
            return Err(ConfigError::ParticleCountMismatch {
                expected: config.particle_count,
                got: positions.len(),
            });
        }

        let arena = Arena::new(config.arena_width, config.arena_height);
        if let Some((index, p)) = positions
            .iter()
            .enumerate()
            .find(|(_, p)| !is_finite(**p) || !arena.contains(**p))
        {
            return Err(ConfigError::ParticleOutsideArena {
                index,
                x: p.x,
                y: p.y,
            });
        }

        let body = ControlledBody::new(arena.center(), config.controlled_radius);
        let field = ParticleField::new(positions.iter().copied().map(Particle::at_rest).collect());

        log::info!(
            "Simulation initialized from layout: {} particles in {}x{} arena",
            field.len(),
            arena.width,
            arena.height
        );

        Ok(Self::assemble(config, arena, body, field))
    }

    fn assemble(config: SimConfig, arena: Arena, body: ControlledBody, field: ParticleField) -> Self {
        Self {
            initial: field.particles().to_vec(),
            config,
            arena,
            body,
            field,
            pointer: None,
            frame: 0,
            contacts: 0,
        }
    }

    /// Restore the initial layout and re-center the body
    pub fn reset(&mut self) {
        self.field = ParticleField::new(self.initial.clone());
        self.body = ControlledBody::new(self.arena.center(), self.config.controlled_radius);
        self.pointer = None;
        self.frame = 0;
        self.contacts = 0;
        log::info!("Simulation reset ({} particles)", self.field.len());
    }

    /// Record the latest pointer position, or clear it when input is lost.
    ///
    /// Non-finite positions are dropped and count as no input.
    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = match pointer {
            Some(p) if !is_finite(p) => {
                log::warn!("Ignoring non-finite pointer position {:?}", p);
                None
            }
            other => other,
        };
    }

    /// Advance exactly one frame
    pub fn step(&mut self) {
        let config = &self.config;

        // Body follows the pointer, kept far enough from the walls that a
        // particle pushed off it still fits inside the arena
        let margin = config.controlled_radius + 2.0 * config.particle_radius;
        let target = self.pointer.map(|p| self.arena.clamp_inset(p, margin));
        self.body.move_to(target);

        // Both force sources must land before integration
        self.field.clear_forces();
        let pairs = self
            .field
            .apply_repulsion(config.interaction_radius, config.repulsion_strength);
        let dragged =
            self.field
                .apply_coupling(&self.body, config.drag_radius(), config.coupling_strength);

        self.field.integrate_velocities(config.damping, config.max_speed);
        self.field.advance_positions();

        let mut contacts = 0;
        for particle in self.field.particles_mut() {
            if resolve_body_collision(
                particle,
                config.particle_radius,
                &self.body,
                config.body_restitution,
            ) {
                contacts += 1;
            }
        }
        for particle in self.field.particles_mut() {
            resolve_boundary_collision(
                particle,
                config.particle_radius,
                &self.arena,
                config.boundary_restitution,
            );
        }

        // Body impulses can outrun the cap
        self.field.limit_speeds(config.max_speed);

        self.contacts = contacts;
        self.frame += 1;

        log::debug!(
            "frame {}: {} pairs, {} dragged, {} contacts",
            self.frame,
            pairs,
            dragged,
            contacts
        );
    }

    /// Snapshot for rendering
    pub fn bodies(&self) -> Bodies {
        Bodies {
            particles: self.field.particles().iter().map(|p| p.pos).collect(),
            controlled: self.body.pos,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        self.field.particles()
    }

    pub fn controlled(&self) -> &ControlledBody {
        &self.body
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Completed frames since construction or the last reset
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn stats(&self) -> FieldStats {
        FieldStats::from_particles(self.field.particles(), self.frame, self.contacts)
    }
}
