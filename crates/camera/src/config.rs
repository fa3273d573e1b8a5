use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Errors from camera setup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraError {
    #[error("invalid camera config: {0}")]
    InvalidConfig(String),
}

/// Chase camera tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Height of the camera above the car.
    pub height: f32,
    /// Starting distance behind the car.
    pub back_distance: f32,
    pub min_back_distance: f32,
    pub max_back_distance: f32,
    /// Wheel delta `d` moves the camera by `d * 0.01 * zoom_speed`.
    pub zoom_speed: f32,
    /// Fraction of the gap to the ideal position closed per update.
    pub smoothing: f32,
    /// The camera aims this far above the car origin.
    pub look_at_height: f32,
    pub fov_degrees: f32,
    /// Where the orbit collaborator starts when orbit mode is entered.
    pub orbit_home: Vec3,
    pub orbit_target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            height: 5.0,
            back_distance: 15.0,
            min_back_distance: 5.0,
            max_back_distance: 30.0,
            zoom_speed: 0.5,
            smoothing: 0.1,
            look_at_height: 2.0,
            fov_degrees: 75.0,
            orbit_home: Vec3::new(-6.0, 3.9, 6.21),
            orbit_target: Vec3::new(-2.64, -0.71, 0.03),
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), CameraError> {
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(CameraError::InvalidConfig(format!(
                "smoothing must lie in (0, 1], got {}",
                self.smoothing
            )));
        }
        if !(self.min_back_distance.is_finite()
            && self.max_back_distance.is_finite()
            && self.min_back_distance <= self.max_back_distance)
        {
            return Err(CameraError::InvalidConfig(format!(
                "zoom range {}..{} is empty",
                self.min_back_distance, self.max_back_distance
            )));
        }
        if !self.height.is_finite() || !self.zoom_speed.is_finite() {
            return Err(CameraError::InvalidConfig(
                "height and zoom_speed must be finite".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(CameraConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_smoothing_and_range() {
        let cfg = CameraConfig {
            smoothing: 0.0,
            ..CameraConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = CameraConfig {
            min_back_distance: 40.0,
            ..CameraConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
