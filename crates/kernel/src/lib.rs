//! Driving kernel: one session stepping input, car and camera per frame.
//!
//! # Invariants
//! - `Session::step` is the only writer of vehicle pose and camera state.
//! - Input is read once at the start of a step; events arriving mid-step
//!   land in the next one.
//! - Given the same config and the same input sequence, two sessions produce
//!   identical `state_hash` values.

mod config;
mod session;

pub use config::{ConfigError, SessionConfig};
pub use session::{AttachedSession, Frame, PhysicsWorld, Session, SessionError, SessionEvent};

pub fn crate_info() -> &'static str {
    "carquest-kernel v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("kernel"));
    }
}
