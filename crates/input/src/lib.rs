//! Input: host key and wheel events mapped to logical driving controls.
//!
//! # Invariants
//! - Event callbacks only write into [`InputState`]; nothing else mutates it.
//! - The tick reads input once, at its start, through [`InputState::begin_tick`].
//! - Key names are resolved through [`KeyBindings`], never hard-coded downstream.

pub mod control;
mod state;

pub use control::{Control, InputError, KeyBindings};
pub use state::{InputSnapshot, InputState};

pub fn crate_info() -> &'static str {
    "carquest-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
