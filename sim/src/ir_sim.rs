//! IR camera simulator.
//!
//! Converts planned LED positions into raw slot reports with:
//! - Uniform ±noise_std pixel jitter on reported positions
//! - Per-LED dropout (empty slot)
//! - Occasional clutter detections (stray reflections)
//!
//! All randomness comes from a seeded ChaCha8 stream, so a (scenario, seed)
//! pair always reproduces the same raw frames.

use crate::replay::{RawFrame, ReplayLog};
use crate::scenarios::Scenario;
use crate::stick::FramePlan;
use ir_camera::IrCameraParams;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use stick_tracker::types::{Source, SENSOR_HEIGHT, SENSOR_WIDTH};

/// Simulated capture pipeline for one camera.
pub struct IrCameraSim {
    pub params: IrCameraParams,
    rng: ChaCha8Rng,
}

impl IrCameraSim {
    pub fn new(params: IrCameraParams, seed: u64) -> Self {
        Self {
            params,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Produce one raw slot report for the planned LED positions.
    /// A dropped LED leaves its slot empty, the way the hardware does.
    pub fn capture(&mut self, plan: &FramePlan) -> Vec<Option<Source>> {
        let mut slots: Vec<Option<Source>> = vec![None; self.params.slots];

        for (slot, led) in plan.leds.iter().enumerate() {
            if slot >= slots.len() {
                break;
            }
            if self.rng.gen::<f64>() < self.params.dropout_prob {
                continue;
            }
            let jitter = self.params.noise_std;
            let x = led.x + self.rng.gen::<f64>() * jitter * 2.0 - jitter;
            let y = led.y + self.rng.gen::<f64>() * jitter * 2.0 - jitter;
            slots[slot] = Some(Source::new(
                (x.round() as i32).clamp(0, SENSOR_WIDTH),
                (y.round() as i32).clamp(0, SENSOR_HEIGHT),
                2,
            ));
        }

        // Clutter lands in the first free slot, if any is left.
        if self.rng.gen::<f64>() < self.params.clutter_prob {
            if let Some(free) = slots.iter_mut().find(|s| s.is_none()) {
                let x = self.rng.gen_range(0..=SENSOR_WIDTH);
                let y = self.rng.gen_range(0..=SENSOR_HEIGHT);
                *free = Some(Source::new(x, y, 1));
            }
        }

        slots
    }
}

/// Run a scenario through the camera sim and collect the raw frames.
pub fn record(scenario: &Scenario, seed: u64) -> ReplayLog {
    let mut camera = IrCameraSim::new(scenario.camera.clone(), seed);
    let dt = scenario.camera.frame_interval();
    let frames = scenario
        .frames
        .iter()
        .enumerate()
        .map(|(i, plan)| RawFrame {
            timestamp: i as f64 * dt,
            sources: camera.capture(plan),
        })
        .collect();
    ReplayLog {
        scenario_name: scenario.name.clone(),
        seed,
        frame_rate: scenario.camera.frame_rate,
        frames,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
