use std::path::Path;

use carquest_camera::CameraConfig;
use carquest_input::KeyBindings;
use carquest_terrain::{DEFAULT_DISPLAY_SCALE, NoiseKind, SampleMode, TerrainParams};
use carquest_vehicle::VehicleConfig;
use serde::{Deserialize, Serialize};

/// Errors from loading a session config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Everything needed to start a session. Every section is optional in YAML;
/// missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seeds terrain noise, mountain stamps, bumps and ramp placement.
    pub seed: u64,
    /// Samples per terrain edge.
    pub resolution: usize,
    /// World edge length of the terrain.
    pub size: f32,
    pub noise: NoiseKind,
    pub terrain: TerrainParams,
    pub sample_mode: SampleMode,
    /// Multiplier from stored samples to world elevation.
    pub display_scale: f32,
    pub vehicle: VehicleConfig,
    pub camera: CameraConfig,
    /// Key map. A `bindings` section replaces the default map as a whole,
    /// so list every key you want bound.
    pub bindings: KeyBindings,
    /// Decorative ramps scattered over the map.
    pub ramps: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            resolution: 256,
            size: 500.0,
            noise: NoiseKind::Hash,
            terrain: TerrainParams::default(),
            sample_mode: SampleMode::Nearest,
            display_scale: DEFAULT_DISPLAY_SCALE,
            vehicle: VehicleConfig::default(),
            camera: CameraConfig::default(),
            bindings: KeyBindings::default(),
            ramps: 20,
        }
    }
}

impl SessionConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!(path = %path.display(), seed = config.seed, "loaded session config");
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carquest_input::Control;
    use std::io::Write;

    #[test]
    fn empty_yaml_gives_defaults() {
        let cfg = SessionConfig::from_yaml_str("{}").unwrap();
        assert_eq!(cfg, SessionConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let yaml = r#"
seed: 7
resolution: 64
noise: perlin
sample_mode: bilinear
vehicle:
  max_speed: 3.5
camera:
  smoothing: 0.2
terrain:
  floor: -1.0
bindings:
  ArrowUp: forward
"#;
        let cfg = SessionConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.resolution, 64);
        assert_eq!(cfg.noise, NoiseKind::Perlin);
        assert_eq!(cfg.sample_mode, SampleMode::Bilinear);
        assert_eq!(cfg.vehicle.max_speed, 3.5);
        assert_eq!(cfg.vehicle.acceleration, VehicleConfig::default().acceleration);
        assert_eq!(cfg.camera.smoothing, 0.2);
        assert_eq!(cfg.terrain.floor, Some(-1.0));
        assert_eq!(cfg.terrain.octaves.len(), 3);
        assert_eq!(cfg.bindings.control_for("arrowup"), Some(Control::Forward));
        assert_eq!(cfg.bindings.control_for("ArrowUp"), Some(Control::Forward));
        assert_eq!(cfg.size, 500.0);
    }

    #[test]
    fn bindings_section_replaces_default_keys() {
        let cfg = SessionConfig::from_yaml_str("bindings:\n  ArrowUp: forward\n").unwrap();
        assert_eq!(cfg.bindings.len(), 1);
        assert_eq!(cfg.bindings.control_for("w"), None);
        assert_eq!(SessionConfig::default().bindings.control_for("w"), Some(Control::Forward));
    }

    #[test]
    fn yaml_round_trip() {
        let cfg = SessionConfig::default();
        let text = cfg.to_yaml().unwrap();
        assert_eq!(SessionConfig::from_yaml_str(&text).unwrap(), cfg);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed: 99\nramps: 3").unwrap();
        let cfg = SessionConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(cfg.seed, 99);
        assert_eq!(cfg.ramps, 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SessionConfig::from_yaml_file(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn malformed_yaml_is_yaml_error() {
        let err = SessionConfig::from_yaml_str("seed: [not a number").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }
}
