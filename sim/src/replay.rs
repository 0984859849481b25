//! Replay: serialize/deserialize raw frame logs for offline re-processing.

use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use stick_tracker::types::Source;

/// One raw camera frame exactly as the tracker would receive it: fixed slot
/// layout, absent slots included.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawFrame {
    pub timestamp: f64,
    pub sources: Vec<Option<Source>>,
}

/// A full recorded run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayLog {
    pub scenario_name: String,
    pub seed: u64,
    pub frame_rate: f64,
    /// All frames in chronological order
    pub frames: Vec<RawFrame>,
}

/// Save a replay log to a JSON file.
pub fn save_replay(log: &ReplayLog, path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, log)?;
    Ok(())
}

/// Load a replay log from a JSON file.
pub fn load_replay(path: &Path) -> anyhow::Result<ReplayLog> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);
    let log: ReplayLog = serde_json::from_reader(reader)?;
    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_log_survives_json() {
        let log = ReplayLog {
            scenario_name: "single-shot".into(),
            seed: 42,
            frame_rate: 100.0,
            frames: vec![RawFrame {
                timestamp: 0.01,
                sources: vec![Some(Source::new(512, 450, 2)), None, None, None],
            }],
        };
        let json = serde_json::to_string(&log).unwrap();
        let back: ReplayLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }
}
