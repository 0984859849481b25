//! IR camera capture parameters.

use serde::{Deserialize, Serialize};

/// Physical capture characteristics of the IR camera.
///
/// The hardware reports a fixed number of detection slots per frame; a slot
/// with no blob in view is absent. These parameters describe how real
/// captures degrade and are consumed by the simulator to produce realistic
/// raw frames.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IrCameraParams {
    /// Number of detection slots reported per frame.
    pub slots: usize,
    /// Probability that a visible LED produces no detection in a frame.
    pub dropout_prob: f64,
    /// Pixel jitter amplitude on reported positions (uniform ±noise_std).
    pub noise_std: f64,
    /// Probability of one spurious (clutter) detection per frame.
    pub clutter_prob: f64,
    /// Frame rate (Hz).
    pub frame_rate: f64,
}

impl Default for IrCameraParams {
    fn default() -> Self {
        Self {
            slots: 4,           // the motion-controller camera reports 4 slots
            dropout_prob: 0.02, // occasional missed blob
            noise_std: 1.5,     // ~1-2 px jitter at rest
            clutter_prob: 0.01, // stray reflections are rare indoors
            frame_rate: 100.0,
        }
    }
}

impl IrCameraParams {
    /// A noiseless, dropout-free camera for deterministic tests.
    pub fn ideal() -> Self {
        Self {
            dropout_prob: 0.0,
            noise_std: 0.0,
            clutter_prob: 0.0,
            ..Self::default()
        }
    }

    /// Seconds between frames.
    pub fn frame_interval(&self) -> f64 {
        1.0 / self.frame_rate
    }
}
