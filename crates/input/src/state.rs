use std::collections::BTreeSet;

use crate::control::{Control, KeyBindings};

/// Everything the tick needs from input, captured once at tick start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub brake: bool,
    /// Number of camera-mode presses since the previous tick.
    pub camera_toggles: u32,
    /// Wheel deltas since the previous tick, one per event, oldest first.
    /// Kept separate because zoom clamps after every event.
    pub wheel_deltas: Vec<f32>,
}

/// Session-wide input state written by event callbacks.
///
/// Held controls are level-triggered and survive across ticks; wheel deltas
/// and camera toggles are drained by [`InputState::begin_tick`].
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: BTreeSet<Control>,
    wheel_deltas: Vec<f32>,
    camera_toggles: u32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key event from the host. Unbound keys are ignored.
    pub fn key(&mut self, bindings: &KeyBindings, key: &str, pressed: bool) {
        match bindings.control_for(key) {
            Some(control) => self.set(control, pressed),
            None => tracing::trace!(key, "unbound key"),
        }
    }

    /// Press or release a control directly.
    pub fn set(&mut self, control: Control, pressed: bool) {
        if pressed {
            let newly = self.held.insert(control);
            if newly && control == Control::ToggleCameraMode {
                self.camera_toggles += 1;
            }
        } else {
            self.held.remove(&control);
        }
    }

    /// Mouse wheel event from the host.
    pub fn wheel(&mut self, delta: f32) {
        if delta.is_finite() {
            self.wheel_deltas.push(delta);
        }
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held.contains(&control)
    }

    /// Capture the frame's input and drain the one-shot parts.
    pub fn begin_tick(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot {
            forward: self.is_held(Control::Forward),
            backward: self.is_held(Control::Backward),
            turn_left: self.is_held(Control::TurnLeft),
            turn_right: self.is_held(Control::TurnRight),
            brake: self.is_held(Control::Brake),
            camera_toggles: self.camera_toggles,
            wheel_deltas: std::mem::take(&mut self.wheel_deltas),
        };
        self.camera_toggles = 0;
        snapshot
    }

    /// Forget everything; used when listeners detach.
    pub fn clear(&mut self) {
        self.held.clear();
        self.wheel_deltas.clear();
        self.camera_toggles = 0;
    }
}
