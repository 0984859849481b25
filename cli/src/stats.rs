//! Offline statistics over recorded session logs.
//!
//! Reads the line-oriented format written by the tracker's session log:
//! event lines (`calibrated [1.000]`, `shoot-started [2.500]`, ...), frame
//! records, and a final `ended after <secs>` marker. Shots without a
//! matching end event are dropped, matching the on-device semantics where
//! only completed swings count.

use anyhow::{Context, Result};
use std::io::BufRead;

/// Aggregate numbers for one session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionStats {
    /// Completed shots (started and ended).
    pub shots: usize,
    pub calibrations: usize,
    pub track_losses: usize,
    /// Mean duration of a completed shot, seconds. 0 when no shot completed.
    pub mean_shot_secs: f64,
    /// Total session length, seconds (from the end marker).
    pub total_secs: f64,
}

/// Extract the `[secs]` suffix of an event or frame line.
fn trailing_timestamp(line: &str) -> Option<f64> {
    let line = line.trim_end();
    let rest = line.strip_suffix(']')?;
    let open = rest.rfind('[')?;
    rest[open + 1..].parse().ok()
}

/// Parse a session log into aggregate statistics.
pub fn parse_stats<R: BufRead>(reader: R) -> Result<SessionStats> {
    let mut stats = SessionStats::default();
    let mut open_shot: Option<f64> = None;
    let mut durations: Vec<f64> = Vec::new();

    for line in reader.lines() {
        let line = line.context("reading session log line")?;

        if let Some(total) = line.trim_end().strip_prefix("ended after ") {
            stats.total_secs = total
                .parse()
                .with_context(|| format!("bad end marker: {line:?}"))?;
            continue;
        }

        let Some(t) = trailing_timestamp(&line) else {
            continue;
        };
        if line.starts_with("calibrated") {
            stats.calibrations += 1;
        } else if line.starts_with("shoot-started") {
            open_shot = Some(t);
        } else if line.starts_with("shoot-ended") {
            if let Some(start) = open_shot.take() {
                durations.push(t - start);
            }
        } else if line.starts_with("track-lost") {
            stats.track_losses += 1;
        }
        // Frame records carry no aggregate information here.
    }

    stats.shots = durations.len();
    if !durations.is_empty() {
        stats.mean_shot_secs = durations.iter().sum::<f64>() / durations.len() as f64;
    }
    Ok(stats)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
