//! Drag Field entry point
//!
//! The browser build is driven from JS through `platform::web`. Natively this
//! runs a headless session: the body is swept through the field along a
//! scripted pointer path, stats are logged, and the final snapshot is printed
//! as JSON.
//!
//! Usage: `drag-field [config.json | low | medium | high] [frames]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Drag Field (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::f32::consts::TAU;

    use drag_field::sim::Arena;
    use drag_field::{QualityPreset, SimConfig, Simulation};
    use glam::Vec2;

    const DEFAULT_FRAMES: u64 = 600;
    /// Log stats once per simulated second
    const STATS_EVERY: u64 = 60;

    pub fn run() -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args().skip(1);
        let config = match args.next() {
            Some(arg) => match QualityPreset::parse(&arg) {
                Some(preset) => {
                    log::info!("Using {} preset", preset.as_str());
                    SimConfig::from_preset(preset)
                }
                None => SimConfig::load(arg)?,
            },
            None => SimConfig::default(),
        };
        let frames = match args.next() {
            Some(n) => n.parse::<u64>()?,
            None => DEFAULT_FRAMES,
        };

        let mut sim = Simulation::new(config)?;
        let arena = *sim.arena();

        for frame in 0..frames {
            sim.set_pointer(scripted_pointer(&arena, frame, frames));
            sim.step();

            if sim.frame() % STATS_EVERY == 0 {
                let stats = sim.stats();
                log::info!(
                    "frame {}: energy {:.1}, mean speed {:.2}, peak {:.2}, contacts {}",
                    stats.frame,
                    stats.kinetic_energy,
                    stats.mean_speed,
                    stats.peak_speed,
                    stats.contacts
                );
            }
        }

        let report = serde_json::json!({
            "stats": sim.stats(),
            "bodies": sim.bodies(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }

    /// Sweep left to right with a vertical wobble for two thirds of the run,
    /// then let go so the field settles
    fn scripted_pointer(arena: &Arena, frame: u64, total: u64) -> Option<Vec2> {
        let sweep_frames = total / 3 * 2;
        if frame >= sweep_frames {
            return None;
        }

        let t = frame as f32 / sweep_frames.max(1) as f32;
        let x = arena.width * (0.1 + 0.8 * t);
        let y = arena.height * (0.5 + 0.25 * (t * 2.0 * TAU).sin());
        Some(Vec2::new(x, y))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_scripted_pointer_releases_after_sweep() {
            let arena = Arena::new(800.0, 500.0);
            assert_eq!(scripted_pointer(&arena, 0, 600), Some(Vec2::new(80.0, 250.0)));
            assert!(scripted_pointer(&arena, 399, 600).is_some());
            assert_eq!(scripted_pointer(&arena, 400, 600), None);
        }

        #[test]
        fn test_scripted_pointer_handles_huge_frame_counts() {
            let arena = Arena::new(800.0, 500.0);
            let pointer = scripted_pointer(&arena, 1, u64::MAX).expect("still sweeping");
            assert!(arena.contains(pointer));
            assert_eq!(scripted_pointer(&arena, u64::MAX - 1, u64::MAX), None);
        }
    }
}
