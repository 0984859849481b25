//! Stick motion: per-frame true LED positions before camera degradation.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Continuous position in sensor space; the camera sim quantizes to pixels.
pub type PlanarPos = Point2<f64>;

/// True LED positions for one frame. Order is grip LED, tip LED, then any
/// extra (trigger) LED — extras last, so the tracker's discovery-order
/// outlier removal drops them first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FramePlan {
    pub leds: Vec<PlanarPos>,
}

/// A rigid two-LED stick held vertically: grip LED on top, tip LED `length`
/// pixels below (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stick {
    pub grip: PlanarPos,
    pub length: f64,
}

impl Stick {
    pub fn new(x: f64, y: f64, length: f64) -> Self {
        Self {
            grip: PlanarPos::new(x, y),
            length,
        }
    }

    pub fn tip(&self) -> PlanarPos {
        self.grip + Vector2::new(0.0, self.length)
    }

    /// Both stick LEDs, grip first.
    pub fn leds(&self) -> Vec<PlanarPos> {
        vec![self.grip, self.tip()]
    }

    /// Stick LEDs plus the trigger LED raised `lift` pixels above the grip,
    /// x-aligned — the calibration gesture.
    pub fn gesture_leds(&self, lift: f64) -> Vec<PlanarPos> {
        vec![self.grip, self.tip(), self.grip - Vector2::new(0.0, lift)]
    }

    /// Translate the stick rigidly so the tip lands on `target`.
    pub fn with_tip_at(&self, target: PlanarPos) -> Self {
        Self {
            grip: target - Vector2::new(0.0, self.length),
            length: self.length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tip_hangs_below_grip() {
        let stick = Stick::new(512.0, 450.0, 150.0);
        assert_eq!(stick.tip(), PlanarPos::new(512.0, 600.0));
        assert_eq!(stick.leds().len(), 2);
    }

    #[test]
    fn gesture_raises_the_trigger_above_the_grip() {
        let stick = Stick::new(512.0, 450.0, 150.0);
        let leds = stick.gesture_leds(150.0);
        assert_eq!(leds.len(), 3);
        assert_eq!(leds[2], PlanarPos::new(512.0, 300.0));
    }

    #[test]
    fn with_tip_at_keeps_the_stick_rigid() {
        let stick = Stick::new(512.0, 450.0, 150.0);
        let moved = stick.with_tip_at(PlanarPos::new(500.0, 686.0));
        assert_eq!(moved.tip(), PlanarPos::new(500.0, 686.0));
        assert_eq!(moved.length, 150.0);
        assert_eq!(moved.grip, PlanarPos::new(500.0, 536.0));
    }
}
