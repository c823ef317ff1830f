//! Browser binding
//!
//! JS owns the canvas and the pointer listeners; it pushes pointer samples in
//! and pulls a flat position buffer out once per animation frame.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use super::FrameScheduler;
use crate::settings::SimConfig;
use crate::sim::Simulation;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier module instance
        return;
    }
    log::info!("Drag field module loaded");
}

/// Simulation handle exported to JS
#[wasm_bindgen]
pub struct WebSimulation {
    sim: Simulation,
    scheduler: FrameScheduler,
}

#[wasm_bindgen]
impl WebSimulation {
    /// Build from an optional JSON config; missing fields take defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebSimulation, JsValue> {
        let config = match config_json {
            Some(json) => SimConfig::from_json_str(&json),
            None => Ok(SimConfig::default()),
        }
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let scheduler = FrameScheduler::new(config.frame_rate);
        let sim = Simulation::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { sim, scheduler })
    }

    /// Pointer position in arena-local coordinates
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.sim.set_pointer(Some(Vec2::new(x, y)));
    }

    /// Pointer released or left the canvas
    pub fn clear_pointer(&mut self) {
        self.sim.set_pointer(None);
    }

    /// Run the frames owed for `dt_seconds` of wall-clock time
    pub fn advance(&mut self, dt_seconds: f32) -> u32 {
        self.scheduler.drive(&mut self.sim, dt_seconds)
    }

    /// Run exactly one frame, ignoring the scheduler
    pub fn step(&mut self) {
        self.sim.step();
    }

    pub fn pause(&mut self) {
        self.scheduler.pause();
    }

    pub fn resume(&mut self) {
        self.scheduler.resume();
    }

    pub fn reset(&mut self) {
        self.sim.reset();
    }

    /// Particle centers as `[x0, y0, x1, y1, ...]`
    pub fn positions(&self) -> js_sys::Float32Array {
        let flat: Vec<f32> = self
            .sim
            .particles()
            .iter()
            .flat_map(|p| [p.pos.x, p.pos.y])
            .collect();
        js_sys::Float32Array::from(flat.as_slice())
    }

    pub fn controlled_x(&self) -> f32 {
        self.sim.controlled().pos.x
    }

    pub fn controlled_y(&self) -> f32 {
        self.sim.controlled().pos.y
    }

    pub fn particle_count(&self) -> usize {
        self.sim.particles().len()
    }

    pub fn particle_radius(&self) -> f32 {
        self.sim.config().particle_radius
    }

    pub fn controlled_radius(&self) -> f32 {
        self.sim.config().controlled_radius
    }
}
