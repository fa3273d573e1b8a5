use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A logical control the host can hold down.
///
/// The simulation consumes controls, never raw key names, so rebinding keys
/// never touches driving logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    Brake,
    /// Edge-triggered: each press flips follow/orbit camera.
    ToggleCameraMode,
}

impl Control {
    pub const ALL: [Control; 6] = [
        Control::Forward,
        Control::Backward,
        Control::TurnLeft,
        Control::TurnRight,
        Control::Brake,
        Control::ToggleCameraMode,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::TurnLeft => "turn_left",
            Self::TurnRight => "turn_right",
            Self::Brake => "brake",
            Self::ToggleCameraMode => "toggle_camera_mode",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors from input configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown control {0:?}")]
    UnknownControl(String),
}

impl FromStr for Control {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
        Control::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| InputError::UnknownControl(s.to_string()))
    }
}

/// Key name to control mapping. Key names are whatever the host reports
/// (`"w"`, `"Space"`, `"ArrowUp"`); matching ignores ASCII case, including
/// for keys loaded from config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Control>",
    into = "BTreeMap<String, Control>"
)]
pub struct KeyBindings {
    keys: BTreeMap<String, Control>,
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    /// Bind `key` to `control`, replacing any previous binding of that key.
    pub fn bind(&mut self, key: &str, control: Control) {
        self.keys.insert(normalize(key), control);
    }

    pub fn unbind(&mut self, key: &str) -> Option<Control> {
        self.keys.remove(&normalize(key))
    }

    pub fn control_for(&self, key: &str) -> Option<Control> {
        self.keys.get(&normalize(key)).copied()
    }

    /// Keys bound to `control`, in sorted order.
    pub fn keys_for(&self, control: Control) -> Vec<&str> {
        self.keys
            .iter()
            .filter(|(_, c)| **c == control)
            .map(|(k, _)| k.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for KeyBindings {
    /// WASD to drive, space to brake, `k` to switch camera mode.
    fn default() -> Self {
        let mut b = Self::empty();
        b.bind("w", Control::Forward);
        b.bind("s", Control::Backward);
        b.bind("a", Control::TurnLeft);
        b.bind("d", Control::TurnRight);
        b.bind("space", Control::Brake);
        b.bind(" ", Control::Brake);
        b.bind("k", Control::ToggleCameraMode);
        b
    }
}

impl From<BTreeMap<String, Control>> for KeyBindings {
    fn from(keys: BTreeMap<String, Control>) -> Self {
        let mut b = Self::empty();
        for (key, control) in keys {
            b.bind(&key, control);
        }
        b
    }
}

impl From<KeyBindings> for BTreeMap<String, Control> {
    fn from(b: KeyBindings) -> Self {
        b.keys
    }
}

fn normalize(key: &str) -> String {
    key.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_cover_every_control() {
        let b = KeyBindings::default();
        for c in Control::ALL {
            assert!(!b.keys_for(c).is_empty(), "{c} unbound");
        }
    }

    #[test]
    fn lookup_ignores_case() {
        let b = KeyBindings::default();
        assert_eq!(b.control_for("W"), Some(Control::Forward));
        assert_eq!(b.control_for("Space"), Some(Control::Brake));
        assert_eq!(b.control_for(" "), Some(Control::Brake));
        assert_eq!(b.control_for("q"), None);
    }

    #[test]
    fn rebinding_replaces() {
        let mut b = KeyBindings::default();
        b.bind("w", Control::Brake);
        assert_eq!(b.control_for("w"), Some(Control::Brake));
        assert_eq!(b.unbind("w"), Some(Control::Brake));
        assert_eq!(b.control_for("w"), None);
    }

    #[test]
    fn deserialized_keys_match_any_case() {
        let b: KeyBindings =
            serde_json::from_str(r#"{"ArrowUp": "forward", "SHIFT": "brake"}"#).unwrap();
        assert_eq!(b.len(), 2);
        assert_eq!(b.control_for("arrowup"), Some(Control::Forward));
        assert_eq!(b.control_for("ArrowUp"), Some(Control::Forward));
        assert_eq!(b.control_for("Shift"), Some(Control::Brake));
    }

    #[test]
    fn serialized_bindings_load_back() {
        let b = KeyBindings::default();
        let text = serde_json::to_string(&b).unwrap();
        assert_eq!(serde_json::from_str::<KeyBindings>(&text).unwrap(), b);
    }

    #[test]
    fn control_parses_from_names() {
        assert_eq!("forward".parse::<Control>(), Ok(Control::Forward));
        assert_eq!("turn-left".parse::<Control>(), Ok(Control::TurnLeft));
        assert_eq!(" Brake ".parse::<Control>(), Ok(Control::Brake));
        assert_eq!(
            "jump".parse::<Control>(),
            Err(InputError::UnknownControl("jump".into()))
        );
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for c in Control::ALL {
            assert_eq!(c.to_string().parse::<Control>(), Ok(c));
        }
    }
}
