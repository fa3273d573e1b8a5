//! Shared types used across the carquest crates.
//!
//! # Invariants
//! - Types here carry plain data only; no simulation logic lives in this crate.

mod types;

pub use types::{EntityId, Transform};

pub fn crate_info() -> &'static str {
    "carquest-common v0.1.0"
}
