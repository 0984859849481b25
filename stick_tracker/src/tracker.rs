//! The tracker: calibration state, point correspondence, and the shot state
//! machine.
//!
//! # Processing steps per frame (single synchronous stream)
//! 1. Preprocess: drop absent slots, apply camera rotation
//! 2. Uncalibrated: look for a calibration gesture, nag on a patience cycle
//! 3. Calibrated: attempt point correspondence against the last snapshot
//! 4. On success: refresh the touching point, evaluate the shot predicates
//! 5. On failure: count the miss; exhaust tracking patience → lose track
//! 6. Append the frame record to the session log, if one is attached
//!
//! `receive` never blocks, never suspends, and never returns an error:
//! every outcome is expressed through the observable state fields. All
//! patience is frame-count based, so behavior is independent of frame-rate
//! jitter.

use crate::{
    calibration, correspondence, geometry,
    preprocess::{self, CameraRotation},
    session::{SessionEvent, SessionLog},
    types::{PixelPos, Snapshot, Source},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write as _;
use std::io::Write;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Configuration for one tracker instance. Immutable for its lifetime:
/// changing geometry means building a fresh tracker, which forces the
/// recalibration the new geometry requires.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Number of stick-mounted sources to track.
    pub tracker_size: usize,
    /// Vertical rank of the disposable trigger point inside a calibration
    /// gesture (0 = topmost of the `tracker_size + 1` gesture points).
    pub trigger_index: usize,
    /// Virtual puck location in sensor space.
    pub puck_position: PixelPos,
    /// Pixel radius around the puck that counts as "touching".
    pub puck_proximity: i32,
    /// Physical camera mounting correction.
    pub camera_rotation: CameraRotation,
    /// Frames of silence between repeated "waiting for calibration" notices.
    pub calibration_patience: u32,
    /// Consecutive failed-match frames tolerated before declaring loss of
    /// track.
    pub tracking_patience: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tracker_size: 2,
            trigger_index: 0,
            puck_position: PixelPos::new(512, 691), // bottom-center of the frame
            puck_proximity: 25,
            camera_rotation: CameraRotation::Deg0,
            calibration_patience: 1000,
            tracking_patience: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// The tracker's externally visible state. `Uncalibrated` is a recoverable
/// reset state, not terminal; the machine runs for as long as frames arrive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackerState {
    /// No valid snapshot; waiting for a calibration gesture.
    Uncalibrated,
    /// Calibrated, tip not currently touching the puck region.
    Waiting,
    /// Tip crossed into the puck region; a shot is in progress.
    Shooting,
}

impl TrackerState {
    /// One-letter form used in session logs and status displays.
    pub fn letter(self) -> char {
        match self {
            Self::Uncalibrated => 'U',
            Self::Waiting => 'W',
            Self::Shooting => 'S',
        }
    }
}

impl fmt::Display for TrackerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// Owns all runtime tracking state. Driven by a single logical stream of
/// frames through [`Tracker::receive`]; collaborators read the exposed
/// accessors between calls and never mutate anything.
pub struct Tracker {
    config: TrackerConfig,
    /// Fixed per instance: `puck_y − 0.1 × sensor_height`.
    shooting_line: f64,
    state: TrackerState,
    /// Snapshot captured at the last successful calibration, kept for the
    /// depth estimate.
    calibration_snapshot: Option<Snapshot>,
    /// Latest successfully tracked snapshot.
    current_snapshot: Option<Snapshot>,
    /// Latest preprocessed detections, for display.
    current_sources: Vec<Source>,
    /// Derived position of the stick tip.
    touching_point: Option<PixelPos>,
    ask_counter: u32,
    lose_counter: u32,
    shoot_counter: u32,
    log: Option<SessionLog>,
}

impl Tracker {
    pub fn new(config: TrackerConfig) -> Self {
        debug_assert!(config.tracker_size >= 2, "tip geometry needs two points");
        debug_assert!(config.trigger_index <= config.tracker_size);
        let shooting_line = geometry::shooting_line(config.puck_position.y);
        Self {
            config,
            shooting_line,
            state: TrackerState::Uncalibrated,
            calibration_snapshot: None,
            current_snapshot: None,
            current_sources: Vec::new(),
            touching_point: None,
            ask_counter: 0,
            lose_counter: 0,
            shoot_counter: 0,
            log: None,
        }
    }

    // -- read-only surface ---------------------------------------------------

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn current_sources(&self) -> &[Source] {
        &self.current_sources
    }

    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.current_snapshot.as_ref()
    }

    pub fn touching_point(&self) -> Option<PixelPos> {
        self.touching_point
    }

    pub fn shoot_counter(&self) -> u32 {
        self.shoot_counter
    }

    pub fn shooting_line(&self) -> f64 {
        self.shooting_line
    }

    // -- session logging -----------------------------------------------------

    /// Attach (or replace) the session log sink. `session_start` is the
    /// timestamp all logged times are made relative to.
    pub fn set_log_sink(&mut self, sink: Box<dyn Write + Send>, session_start: f64) {
        self.log = Some(SessionLog::new(sink, session_start));
    }

    /// Write the end-of-session marker and detach the sink.
    pub fn finish_session(&mut self, timestamp: f64) {
        if let Some(mut log) = self.log.take() {
            if let Err(e) = log.finish(timestamp) {
                tracing::warn!(error = %e, "session log close failed");
            }
        }
    }

    /// One textual record for the current frame: per tracked point, an
    /// `"x y z "` integer triple in ascending id order. z is the rounded
    /// depth estimate, 0 when no calibration reference is available. The
    /// sink appends line breaks, not this method.
    pub fn frame_record(&self) -> Option<String> {
        let snap = self.current_snapshot.as_ref()?;
        let z = self
            .calibration_snapshot
            .as_ref()
            .and_then(|calib| geometry::estimate_depth(calib, snap))
            .map(|z| z.round() as i64)
            .unwrap_or(0);
        let mut record = String::new();
        for (_, s) in snap.iter() {
            // Infallible: fmt::Write into a String cannot fail.
            let _ = write!(record, "{} {} {} ", s.pos.x, s.pos.y, z);
        }
        Some(record)
    }

    // -- frame entry point ---------------------------------------------------

    /// Consume one sensor frame. Must be called once per frame, in arrival
    /// order, with sources in sensor-native coordinates.
    pub fn receive(&mut self, raw: &[Option<Source>], timestamp: f64) {
        self.current_sources = preprocess::preprocess(raw, self.config.camera_rotation);

        match self.state {
            TrackerState::Uncalibrated => self.step_uncalibrated(timestamp),
            TrackerState::Waiting | TrackerState::Shooting => self.step_calibrated(timestamp),
        }

        self.log_frame(timestamp);
    }

    fn step_uncalibrated(&mut self, timestamp: f64) {
        match calibration::try_gesture(
            &self.current_sources,
            self.config.tracker_size,
            self.config.trigger_index,
        ) {
            Some(snapshot) => self.calibrate(snapshot, timestamp),
            None => {
                if self.ask_counter == 0 {
                    tracing::info!("waiting for calibration gesture");
                }
                self.ask_counter =
                    (self.ask_counter + 1) % self.config.calibration_patience.max(1);
            }
        }
    }

    fn step_calibrated(&mut self, timestamp: f64) {
        match self.match_frame() {
            Some(snapshot) => {
                let Some(tip) = snapshot.tip().map(|s| s.pos) else {
                    // Unreachable with a correct tracking result; degrade to
                    // the patience path rather than take down the frame loop.
                    debug_assert!(false, "tracked snapshot too small for tip geometry");
                    self.register_miss(timestamp);
                    return;
                };
                self.lose_counter = 0;
                self.touching_point = Some(tip);
                self.current_snapshot = Some(snapshot);

                match self.state {
                    TrackerState::Waiting
                        if geometry::touching_puck(
                            tip,
                            self.config.puck_position,
                            self.config.puck_proximity,
                        ) =>
                    {
                        self.start_shoot(timestamp)
                    }
                    TrackerState::Shooting
                        if !geometry::past_shooting_line(tip, self.shooting_line) =>
                    {
                        self.end_shoot(timestamp)
                    }
                    _ => {}
                }
            }
            None => self.register_miss(timestamp),
        }
    }

    /// Attempt correspondence for the current frame. `None` covers both the
    /// invalid-frame case (fewer than `tracker_size` sources) and a
    /// stalemated match; the caller treats them identically.
    fn match_frame(&self) -> Option<Snapshot> {
        if self.current_sources.len() < self.config.tracker_size {
            return None;
        }
        let Some(prev) = self.current_snapshot.as_ref() else {
            debug_assert!(false, "calibrated tracker must hold a snapshot");
            return None;
        };
        let snapshot = correspondence::track_points(prev, &self.current_sources)?;
        if snapshot.len() != self.config.tracker_size {
            debug_assert!(false, "tracking result must keep the tracker size");
            return None;
        }
        Some(snapshot)
    }

    fn register_miss(&mut self, timestamp: f64) {
        self.lose_counter += 1;
        if self.lose_counter >= self.config.tracking_patience {
            if self.state == TrackerState::Shooting {
                // The tip leaving the field of view is how a real swing
                // ends; the shot still counts.
                self.end_shoot(timestamp);
            }
            self.lose_track(timestamp);
        }
    }

    // -- transitions ---------------------------------------------------------

    fn calibrate(&mut self, snapshot: Snapshot, timestamp: f64) {
        tracing::info!(points = snapshot.len(), "calibrated");
        self.state = TrackerState::Waiting;
        self.touching_point = snapshot.tip().map(|s| s.pos);
        self.calibration_snapshot = Some(snapshot.clone());
        self.current_snapshot = Some(snapshot);
        self.ask_counter = 0;
        self.lose_counter = 0;
        self.log_event(SessionEvent::Calibrated, timestamp);
    }

    fn start_shoot(&mut self, timestamp: f64) {
        tracing::info!("shoot started");
        self.state = TrackerState::Shooting;
        self.log_event(SessionEvent::ShootStarted, timestamp);
    }

    fn end_shoot(&mut self, timestamp: f64) {
        self.shoot_counter += 1;
        tracing::info!(shots = self.shoot_counter, "shoot ended");
        self.reset_to_uncalibrated();
        self.log_event(SessionEvent::ShootEnded, timestamp);
    }

    fn lose_track(&mut self, timestamp: f64) {
        tracing::info!("lost track");
        self.reset_to_uncalibrated();
        self.log_event(SessionEvent::TrackLost, timestamp);
    }

    /// Every path back to `Uncalibrated` drops the snapshots as a group, so
    /// readers between `receive` calls always see a consistent set.
    fn reset_to_uncalibrated(&mut self) {
        self.state = TrackerState::Uncalibrated;
        self.calibration_snapshot = None;
        self.current_snapshot = None;
        self.touching_point = None;
        self.ask_counter = 0;
        self.lose_counter = 0;
    }

    // -- log plumbing --------------------------------------------------------

    fn log_event(&mut self, event: SessionEvent, timestamp: f64) {
        if let Some(log) = self.log.as_mut() {
            if let Err(e) = log.event(event, timestamp) {
                tracing::warn!(error = %e, "session log write failed");
            }
        }
    }

    fn log_frame(&mut self, timestamp: f64) {
        if self.log.is_none() {
            return;
        }
        let Some(record) = self.frame_record() else {
            return;
        };
        if let Some(log) = self.log.as_mut() {
            if let Err(e) = log.frame(&record, timestamp) {
                tracing::warn!(error = %e, "session log write failed");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
