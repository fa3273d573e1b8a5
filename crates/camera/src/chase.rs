use carquest_vehicle::VehiclePose;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::{CameraConfig, CameraError};

/// Who drives the camera.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// The chase camera follows the car.
    #[default]
    Follow,
    /// An external orbit control owns the camera; the chase camera is idle.
    Orbit,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Follow => Self::Orbit,
            Self::Orbit => Self::Follow,
        }
    }
}

/// Camera placement for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Trails the car at a heading-relative offset, closing a fixed fraction of
/// the remaining gap every update.
#[derive(Debug, Clone)]
pub struct ChaseCamera {
    config: CameraConfig,
    position: Vec3,
    /// Car-local offset: x lateral, y up, z behind.
    offset: Vec3,
}

impl ChaseCamera {
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        config.validate()?;
        let back = config
            .back_distance
            .clamp(config.min_back_distance, config.max_back_distance);
        Ok(Self {
            offset: Vec3::new(0.0, config.height, back),
            position: Vec3::ZERO,
            config,
        })
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn back_distance(&self) -> f32 {
        self.offset.z
    }

    /// Apply a wheel delta to the back distance, clamped to the zoom range.
    pub fn zoom(&mut self, wheel_delta: f32) {
        if !wheel_delta.is_finite() {
            return;
        }
        let z = self.offset.z + wheel_delta * 0.01 * self.config.zoom_speed;
        self.offset.z = z.clamp(self.config.min_back_distance, self.config.max_back_distance);
    }

    /// Where the camera would sit with no smoothing.
    pub fn ideal_position(&self, pose: &VehiclePose) -> Vec3 {
        pose.position + pose.rotation() * self.offset
    }

    pub fn look_at(&self, pose: &VehiclePose) -> Vec3 {
        pose.position + Vec3::Y * self.config.look_at_height
    }

    /// Move toward the ideal position by the smoothing fraction.
    pub fn update(&mut self, pose: &VehiclePose) -> CameraFrame {
        let ideal = self.ideal_position(pose);
        self.position = self.position.lerp(ideal, self.config.smoothing);
        CameraFrame {
            position: self.position,
            look_at: self.look_at(pose),
        }
    }

    /// Jump straight to the ideal position.
    pub fn snap_to(&mut self, pose: &VehiclePose) -> CameraFrame {
        self.position = self.ideal_position(pose);
        tracing::debug!(position = ?self.position, "chase camera snapped");
        CameraFrame {
            position: self.position,
            look_at: self.look_at(pose),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    fn camera() -> ChaseCamera {
        ChaseCamera::new(CameraConfig::default()).unwrap()
    }

    #[test]
    fn starts_at_origin_with_default_offset() {
        let cam = camera();
        assert_eq!(cam.position(), Vec3::ZERO);
        assert_eq!(cam.offset(), Vec3::new(0.0, 5.0, 15.0));
    }

    #[test]
    fn zoom_clamps_at_range_ends() {
        let mut cam = camera();
        for _ in 0..1000 {
            cam.zoom(-500.0);
        }
        assert_eq!(cam.back_distance(), 5.0);
        for _ in 0..1000 {
            cam.zoom(500.0);
        }
        assert_eq!(cam.back_distance(), 30.0);
    }

    #[test]
    fn zoom_scales_wheel_delta() {
        let mut cam = camera();
        cam.zoom(100.0);
        assert!((cam.back_distance() - 15.5).abs() < 1e-5);
        cam.zoom(f32::NAN);
        assert!((cam.back_distance() - 15.5).abs() < 1e-5);
    }

    #[test]
    fn ideal_offset_rotates_with_heading() {
        let cam = camera();
        let pose = VehiclePose::at_rest(Vec3::new(1.0, 0.0, 1.0), 0.0);
        assert!((cam.ideal_position(&pose) - Vec3::new(1.0, 5.0, 16.0)).length() < 1e-5);
        let pose = VehiclePose::at_rest(Vec3::ZERO, FRAC_PI_2);
        assert!((cam.ideal_position(&pose) - Vec3::new(15.0, 5.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn update_closes_a_tenth_of_the_gap() {
        let mut cam = camera();
        let pose = VehiclePose::at_rest(Vec3::ZERO, 0.0);
        let frame = cam.update(&pose);
        assert!((frame.position - Vec3::new(0.0, 0.5, 1.5)).length() < 1e-5);
        assert_eq!(frame.look_at, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn converges_on_a_parked_car() {
        let mut cam = camera();
        let pose = VehiclePose::at_rest(Vec3::new(10.0, 1.0, -3.0), 0.3);
        for _ in 0..300 {
            cam.update(&pose);
        }
        assert!((cam.position() - cam.ideal_position(&pose)).length() < 1e-3);
    }

    #[test]
    fn snap_jumps_to_ideal() {
        let mut cam = camera();
        let pose = VehiclePose::at_rest(Vec3::new(4.0, 0.0, 0.0), 0.0);
        let frame = cam.snap_to(&pose);
        assert_eq!(frame.position, cam.ideal_position(&pose));
    }

    #[test]
    fn mode_toggles() {
        assert_eq!(CameraMode::default(), CameraMode::Follow);
        assert_eq!(CameraMode::Follow.toggled(), CameraMode::Orbit);
        assert_eq!(CameraMode::Orbit.toggled(), CameraMode::Follow);
    }

    proptest! {
        #[test]
        fn update_lies_strictly_between(
            sx in -50f32..50.0, sy in -50f32..50.0, sz in -50f32..50.0,
            px in -50f32..50.0, pz in -50f32..50.0,
            heading in -3.2f32..3.2,
            smoothing in 0.01f32..0.99,
        ) {
            let config = CameraConfig { smoothing, ..CameraConfig::default() };
            let mut cam = ChaseCamera::new(config).unwrap();
            cam.position = Vec3::new(sx, sy, sz);
            let pose = VehiclePose::at_rest(Vec3::new(px, 0.0, pz), heading);
            let before = cam.position();
            let ideal = cam.ideal_position(&pose);
            let gap = before.distance(ideal);
            prop_assume!(gap > 1e-2);

            let after = cam.update(&pose).position;
            let moved = before.distance(after);
            let left = after.distance(ideal);
            prop_assert!(moved > 0.0 && left > 0.0);
            prop_assert!(moved < gap && left < gap);
            prop_assert!((moved + left - gap).abs() < 1e-3 * gap.max(1.0));
        }
    }
}
