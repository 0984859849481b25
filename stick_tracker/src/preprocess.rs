//! Frame preprocessing: drop absent detection slots, correct camera mounting.
//!
//! The camera hardware reports a fixed number of detection slots per frame;
//! slots with no detection arrive as `None`. Rigs sometimes mount the camera
//! upside down, so a 180° correction can be applied to every surviving
//! position. Blob sizes pass through unchanged.

use crate::types::{PixelPos, Source, SENSOR_HEIGHT, SENSOR_WIDTH};
use serde::{Deserialize, Serialize};

/// Physical mounting rotation of the camera. Only the two mountings the rig
/// supports are representable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraRotation {
    /// Upright mounting; positions are passed through unchanged.
    #[default]
    Deg0,
    /// Upside-down mounting; reflection through the sensor center.
    Deg180,
}

impl CameraRotation {
    /// Parse a rotation given in degrees. Anything other than 0 or 180 is
    /// not a supported mounting.
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            0 => Some(Self::Deg0),
            180 => Some(Self::Deg180),
            _ => None,
        }
    }

    /// Apply the rotation about the sensor frame's geometric center.
    /// 180° maps `(x, y)` to `(width − x, height − y)` exactly.
    pub fn apply(self, pos: PixelPos) -> PixelPos {
        match self {
            Self::Deg0 => pos,
            Self::Deg180 => PixelPos::new(SENSOR_WIDTH - pos.x, SENSOR_HEIGHT - pos.y),
        }
    }
}

/// Filter absent slots out of a raw frame and rotate what remains.
/// Output order follows slot discovery order; ids are assigned elsewhere.
pub fn preprocess(raw: &[Option<Source>], rotation: CameraRotation) -> Vec<Source> {
    raw.iter()
        .flatten()
        .map(|s| Source {
            pos: rotation.apply(s.pos),
            size: s.size,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_slots_are_dropped() {
        let raw = vec![
            Some(Source::new(10, 20, 1)),
            None,
            Some(Source::new(30, 40, 2)),
            None,
        ];
        let out = preprocess(&raw, CameraRotation::Deg0);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], Source::new(10, 20, 1));
        assert_eq!(out[1], Source::new(30, 40, 2));
    }

    #[test]
    fn zero_rotation_is_identity() {
        let pos = PixelPos::new(123, 456);
        assert_eq!(CameraRotation::Deg0.apply(pos), pos);
    }

    #[test]
    fn half_turn_reflects_through_sensor_center() {
        let pos = PixelPos::new(100, 50);
        assert_eq!(
            CameraRotation::Deg180.apply(pos),
            PixelPos::new(SENSOR_WIDTH - 100, SENSOR_HEIGHT - 50)
        );
        // Applying the half turn twice returns the original position.
        assert_eq!(
            CameraRotation::Deg180.apply(CameraRotation::Deg180.apply(pos)),
            pos
        );
    }

    #[test]
    fn rotation_preserves_size() {
        let raw = vec![Some(Source::new(100, 50, 7))];
        let out = preprocess(&raw, CameraRotation::Deg180);
        assert_eq!(out[0].size, 7);
    }

    #[test]
    fn unsupported_degrees_rejected() {
        assert_eq!(CameraRotation::from_degrees(0), Some(CameraRotation::Deg0));
        assert_eq!(
            CameraRotation::from_degrees(180),
            Some(CameraRotation::Deg180)
        );
        assert_eq!(CameraRotation::from_degrees(90), None);
    }
}
