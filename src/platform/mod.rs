//! Host adapters
//!
//! The engine never schedules itself. Hosts call [`Simulation::step`] once
//! per rendering frame; [`FrameScheduler`] turns wall-clock deltas into a
//! whole number of unit frames so the field moves at the same speed on 60 Hz
//! and 144 Hz displays. Pause lives here, not in the engine.

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::MAX_FRAMES_PER_CALLBACK;
use crate::sim::Simulation;

/// Longest wall-clock delta honored per callback (tab switches, debugger stops)
const MAX_FRAME_DELTA: f32 = 0.1;

/// Fixed-rate frame accumulator
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    interval: f32,
    accumulator: f32,
    max_frames: u32,
    paused: bool,
}

impl FrameScheduler {
    pub fn new(frame_rate: f32) -> Self {
        Self {
            interval: 1.0 / frame_rate,
            accumulator: 0.0,
            max_frames: MAX_FRAMES_PER_CALLBACK,
            paused: false,
        }
    }

    /// Cap on catch-up frames per callback
    pub fn with_max_frames(mut self, max_frames: u32) -> Self {
        self.max_frames = max_frames.max(1);
        self
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    /// Resume without replaying the time spent paused
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.accumulator = 0.0;
            log::info!("Simulation resumed");
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Number of unit frames owed after `dt` seconds of wall-clock time
    pub fn frames_due(&mut self, dt: f32) -> u32 {
        if self.paused || !dt.is_finite() || dt <= 0.0 {
            return 0;
        }

        self.accumulator += dt.min(MAX_FRAME_DELTA);

        let mut frames = 0;
        while self.accumulator >= self.interval && frames < self.max_frames {
            self.accumulator -= self.interval;
            frames += 1;
        }
        frames
    }

    /// Step `sim` for every frame owed after `dt` seconds
    pub fn drive(&mut self, sim: &mut Simulation, dt: f32) -> u32 {
        let frames = self.frames_due(dt);
        for _ in 0..frames {
            sim.step();
        }
        frames
    }
}
