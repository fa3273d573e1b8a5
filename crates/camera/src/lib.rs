//! Camera: third-person chase camera that trails the car.
//!
//! # Invariants
//! - Back distance always lies within the configured zoom range.
//! - Each update moves the camera a fixed fraction toward its ideal spot;
//!   it never snaps.
//! - Camera motion reads the vehicle pose and never writes it.

mod chase;
mod config;

pub use chase::{CameraFrame, CameraMode, ChaseCamera};
pub use config::{CameraConfig, CameraError};

pub fn crate_info() -> &'static str {
    "carquest-camera v0.1.0"
}
