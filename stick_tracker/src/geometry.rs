//! Shot geometry: puck proximity, the shooting line, and the planar depth
//! approximation used for session logging.

use crate::types::{dist_sq, PixelPos, Snapshot, SENSOR_HEIGHT};

/// Fraction of the sensor height the shooting line sits above the puck.
const SHOOTING_LINE_OFFSET: f64 = 0.1;

/// Vertical position of the shooting line for a puck at `puck_y`.
/// Fixed once per tracker instance; y grows downward, so the line sits
/// *above* the puck on screen.
pub fn shooting_line(puck_y: i32) -> f64 {
    puck_y as f64 - SHOOTING_LINE_OFFSET * SENSOR_HEIGHT as f64
}

/// True when the tip is within `proximity` pixels of the puck (squared test).
pub fn touching_puck(tip: PixelPos, puck: PixelPos, proximity: i32) -> bool {
    dist_sq(tip, puck) <= (proximity as i64).pow(2)
}

/// True while the tip is past the shooting line, i.e. strictly deeper into
/// the frame than the line.
pub fn past_shooting_line(tip: PixelPos, line: f64) -> bool {
    tip.y as f64 > line
}

/// Single-axis pinhole depth approximation from stick foreshortening.
///
/// A stick of fixed physical length shrinks on screen as it rotates out of
/// the image plane: `z = sqrt(max(0, calib_dist² − current_dist²))` where
/// both distances are planar squared-Euclidean between the two tracked
/// points. Clamped at zero since only foreshortening, never elongation, is
/// physically expected under calibration error. Requires two-point
/// snapshots; anything else yields `None`.
pub fn estimate_depth(calibration: &Snapshot, current: &Snapshot) -> Option<f64> {
    if calibration.len() != 2 || current.len() != 2 {
        return None;
    }
    let sep = |s: &Snapshot| {
        let mut it = s.iter();
        let (_, a) = it.next()?;
        let (_, b) = it.next()?;
        Some(dist_sq(a.pos, b.pos) as f64)
    };
    let calib_sq = sep(calibration)?;
    let current_sq = sep(current)?;
    Some((calib_sq - current_sq).max(0.0).sqrt())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
