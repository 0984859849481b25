//! `sim` — Stick-swing synthesis, IR camera simulation, replay logs.

pub mod ir_sim;
pub mod replay;
pub mod scenarios;
pub mod stick;

pub use ir_sim::{record, IrCameraSim};
pub use replay::{load_replay, save_replay, RawFrame, ReplayLog};
pub use scenarios::{Scenario, ScenarioKind};
pub use stick::{FramePlan, PlanarPos, Stick};
