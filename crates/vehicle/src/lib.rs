//! Vehicle: a kinematic car glued to heightfield terrain.
//!
//! # Invariants
//! - Speed after the clamp step never exceeds `max_speed`.
//! - A grounded tick leaves vertical velocity non-negative.
//! - Steering is independent of speed; the car can pivot in place.

mod config;
mod controller;
mod pose;

pub use config::{VehicleConfig, VehicleError};
pub use controller::{DriveControls, GroundTransition, TickReport, VehicleController};
pub use pose::VehiclePose;

pub fn crate_info() -> &'static str {
    "carquest-vehicle v0.1.0"
}
