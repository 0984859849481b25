//! `stick_tracker` — IR point tracking and shot detection core.
//!
//! # Module layout
//! - [`types`]          — Fundamental types (point ids, sources, snapshots)
//! - [`preprocess`]     — Slot filtering and camera-rotation correction
//! - [`calibration`]    — Calibration-gesture acceptance and id assignment
//! - [`correspondence`] — Greedy nearest-neighbor frame-to-frame matching
//! - [`geometry`]       — Puck proximity, shooting line, depth estimate
//! - [`tracker`]        — The shot state machine and per-frame entry point
//! - [`session`]        — Session log writer

pub mod calibration;
pub mod correspondence;
pub mod geometry;
pub mod preprocess;
pub mod session;
pub mod tracker;
pub mod types;

pub use preprocess::CameraRotation;
pub use session::{SessionEvent, SessionLog};
pub use tracker::{Tracker, TrackerConfig, TrackerState};
pub use types::{PixelPos, PointId, Snapshot, Source, SENSOR_HEIGHT, SENSOR_WIDTH};
