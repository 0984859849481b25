//! Fundamental types used across the entire workspace.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Sensor space: the repurposed motion-controller IR camera reports integer
// pixel coordinates on a fixed grid.
// ---------------------------------------------------------------------------

/// Horizontal resolution of the IR camera (pixels).
pub const SENSOR_WIDTH: i32 = 1024;
/// Vertical resolution of the IR camera (pixels). y grows downward.
pub const SENSOR_HEIGHT: i32 = 768;

/// Integer pixel position in sensor space.
pub type PixelPos = Point2<i32>;

/// Squared Euclidean distance between two pixel positions.
/// Widened to i64 so squaring cannot overflow.
pub fn dist_sq(a: PixelPos, b: PixelPos) -> i64 {
    let dx = (a.x - b.x) as i64;
    let dy = (a.y - b.y) as i64;
    dx * dx + dy * dy
}

// ---------------------------------------------------------------------------
// Identifier types — newtype wrapper so point ids are never confused with
// raw indices at call sites
// ---------------------------------------------------------------------------

/// Identity of a tracked point, assigned at calibration time by vertical
/// sort order (topmost = 0). Not tied to a physical LED across calibrations.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PointId(pub usize);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// A single raw IR detection in one frame: pixel position plus blob size.
/// Sources are ephemeral; a fresh set arrives with every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub pos: PixelPos,
    pub size: i32,
}

impl Source {
    pub fn new(x: i32, y: i32, size: i32) -> Self {
        Self {
            pos: PixelPos::new(x, y),
            size,
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Point id → [`Source`] mapping: the tracker's current belief about each
/// tracked point's location. Ids are implicit vector indices; a snapshot
/// always holds exactly `tracker_size` entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    points: Vec<Source>,
}

/// The point used for shot geometry: the stick's functional tip.
/// Calibration sorts points top-to-bottom, so for a two-point stick id 1 is
/// the lower point. The convention lives here and nowhere else.
pub const TIP_ID: PointId = PointId(1);

impl Snapshot {
    pub fn new(points: Vec<Source>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, id: PointId) -> Option<&Source> {
        self.points.get(id.0)
    }

    /// Iterate points in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, &Source)> {
        self.points.iter().enumerate().map(|(i, s)| (PointId(i), s))
    }

    /// The stick-tip point ([`TIP_ID`]), if the snapshot is large enough.
    pub fn tip(&self) -> Option<&Source> {
        self.get(TIP_ID)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
