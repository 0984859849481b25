//! Frame-to-frame point correspondence.
//!
//! Greedy nearest-neighbor assignment, deliberately not a globally optimal
//! bipartite matching: each id keeps its closest candidate, which favors
//! temporal continuity. For a ≤3-point, high-frame-rate tracker whose points
//! rarely cross, that is the right trade-off.

use crate::types::{dist_sq, Snapshot, Source};

/// Match the previous snapshot's points against this frame's candidates.
///
/// Candidates beyond `prev.len()` are dropped in discovery order (outlier
/// removal). Ids are processed ascending; each takes its nearest candidate
/// by squared pixel distance. If that candidate was already claimed by a
/// lower id the match is a **stalemate**: the id stays unassigned for this
/// frame — no alternate candidate is substituted.
///
/// Returns the new snapshot iff every id received a distinct source.
/// `None` is a tracking failure to be absorbed by the caller's patience
/// counter, not an error.
pub fn track_points(prev: &Snapshot, candidates: &[Source]) -> Option<Snapshot> {
    let n = prev.len();
    debug_assert!(candidates.len() >= n, "caller must pass a valid frame");
    if candidates.len() < n {
        return None;
    }
    let fit = &candidates[..n];

    let mut assigned: Vec<Option<Source>> = vec![None; n];
    let mut claimed = vec![false; n];
    let mut stalemated = false;

    for (id, last) in prev.iter() {
        let (best, _) = fit
            .iter()
            .enumerate()
            .min_by_key(|(_, c)| dist_sq(c.pos, last.pos))?;

        if claimed[best] {
            tracing::warn!(%id, candidate = best, "stalemate: nearest source already claimed");
            stalemated = true;
            continue;
        }
        claimed[best] = true;
        assigned[id.0] = Some(fit[best]);
    }

    if stalemated {
        return None;
    }
    // No stalemate and n candidates for n ids: every slot is filled.
    let points: Option<Vec<Source>> = assigned.into_iter().collect();
    debug_assert!(points.is_some(), "stalemate-free pass must assign every id");
    points.map(Snapshot::new)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
