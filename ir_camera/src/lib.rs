//! `ir_camera` — Capture model parameters for the trainer's IR camera.

pub mod camera;

pub use camera::IrCameraParams;
