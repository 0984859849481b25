//! Calibration-gesture detection and snapshot construction.
//!
//! A calibration gesture is a frame carrying one extra "trigger" source held
//! roughly vertically aligned with the stick's own points. Accepting the
//! gesture assigns point identities for the rest of the tracking run.

use crate::types::{Snapshot, Source};

/// Maximum horizontal deviation (pixels) of any gesture source from the mean
/// x coordinate. Checked as a squared distance.
pub const GESTURE_X_SPREAD: f64 = 100.0;

/// Check the horizontal-alignment condition: every source's x lies within
/// [`GESTURE_X_SPREAD`] of the mean x (squared comparison).
fn x_spread_ok(sources: &[Source]) -> bool {
    let mean_x = sources.iter().map(|s| s.pos.x as f64).sum::<f64>() / sources.len() as f64;
    sources
        .iter()
        .all(|s| (s.pos.x as f64 - mean_x).powi(2) <= GESTURE_X_SPREAD * GESTURE_X_SPREAD)
}

/// Try to accept a preprocessed frame as a calibration gesture.
///
/// Accepts iff the frame holds exactly `tracker_size + 1` sources and they
/// pass the spread check. On acceptance the sources are sorted top-to-bottom,
/// the one at rank `trigger_index` is discarded, and the remaining sources
/// become the snapshot with ids assigned by that same vertical order.
///
/// Returns `None` on any rejection; a rejected gesture is an ordinary frame,
/// not an error.
pub fn try_gesture(sources: &[Source], tracker_size: usize, trigger_index: usize) -> Option<Snapshot> {
    debug_assert!(trigger_index <= tracker_size, "trigger rank out of range");
    if trigger_index > tracker_size {
        return None;
    }
    if sources.len() != tracker_size + 1 {
        return None;
    }
    if !x_spread_ok(sources) {
        tracing::debug!(
            count = sources.len(),
            "gesture rejected: sources not vertically aligned"
        );
        return None;
    }

    let mut ordered = sources.to_vec();
    // Tie-break on x so the assignment is invariant to input order.
    ordered.sort_by_key(|s| (s.pos.y, s.pos.x));
    ordered.remove(trigger_index);

    debug_assert!(
        ordered.windows(2).all(|w| w[0].pos.y <= w[1].pos.y),
        "snapshot must stay vertically ordered after trigger removal"
    );

    Some(Snapshot::new(ordered))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PixelPos;

    #[test]
    fn accepts_aligned_gesture_and_discards_middle_trigger() {
        // x ≈ [100, 102, 99] within spread, trigger is the middle rank.
        let sources = vec![
            Source::new(100, 50, 1),
            Source::new(102, 150, 1),
            Source::new(99, 250, 1),
        ];
        let snap = try_gesture(&sources, 2, 1).expect("gesture should be accepted");
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.get(crate::types::PointId(0)).unwrap().pos, PixelPos::new(100, 50));
        assert_eq!(snap.get(crate::types::PointId(1)).unwrap().pos, PixelPos::new(99, 250));
    }

    #[test]
    fn acceptance_is_invariant_to_input_order() {
        let mut sources = vec![
            Source::new(100, 50, 1),
            Source::new(102, 150, 1),
            Source::new(99, 250, 1),
        ];
        let snap_a = try_gesture(&sources, 2, 1).unwrap();
        sources.reverse();
        let snap_b = try_gesture(&sources, 2, 1).unwrap();
        assert_eq!(snap_a, snap_b);
    }

    #[test]
    fn rejects_wide_spread() {
        // One source 200 px off the mean: spread check fails.
        let sources = vec![
            Source::new(100, 50, 1),
            Source::new(300, 150, 1),
            Source::new(100, 250, 1),
        ];
        assert!(try_gesture(&sources, 2, 1).is_none());
    }

    #[test]
    fn rejects_wrong_source_count() {
        let two = vec![Source::new(100, 50, 1), Source::new(100, 250, 1)];
        assert!(try_gesture(&two, 2, 1).is_none());

        let four = vec![
            Source::new(100, 50, 1),
            Source::new(100, 150, 1),
            Source::new(100, 250, 1),
            Source::new(100, 350, 1),
        ];
        assert!(try_gesture(&four, 2, 1).is_none());
    }

    #[test]
    fn topmost_trigger_rank() {
        // trigger_index 0 discards the highest source on screen.
        let sources = vec![
            Source::new(100, 400, 1),
            Source::new(101, 120, 1), // trigger, topmost
            Source::new(100, 260, 1),
        ];
        let snap = try_gesture(&sources, 2, 0).unwrap();
        assert_eq!(snap.get(crate::types::PointId(0)).unwrap().pos.y, 260);
        assert_eq!(snap.tip().unwrap().pos.y, 400);
    }
}
