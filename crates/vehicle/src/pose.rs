use carquest_common::Transform;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position, yaw and velocity of the car.
///
/// `velocity` is vehicle-local: `z` is longitudinal (negative drives
/// forward), `y` is vertical, `x` stays zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehiclePose {
    pub position: Vec3,
    /// Yaw in radians about +Y.
    pub heading: f32,
    pub velocity: Vec3,
}

impl VehiclePose {
    pub fn at_rest(position: Vec3, heading: f32) -> Self {
        Self {
            position,
            heading,
            velocity: Vec3::ZERO,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.heading)
    }

    /// Local `(0, 0, 1)` in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::Z
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Transform a renderer can copy onto the car drawable.
    pub fn transform(&self) -> Transform {
        Transform::from_yaw(self.position, self.heading)
    }
}

impl Default for VehiclePose {
    fn default() -> Self {
        Self::at_rest(Vec3::ZERO, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn forward_follows_heading() {
        let pose = VehiclePose::at_rest(Vec3::ZERO, 0.0);
        assert!((pose.forward() - Vec3::Z).length() < 1e-6);
        let pose = VehiclePose::at_rest(Vec3::ZERO, FRAC_PI_2);
        assert!((pose.forward() - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn transform_copies_position_and_yaw() {
        let pose = VehiclePose::at_rest(Vec3::new(1.0, 2.0, 3.0), 0.5);
        let t = pose.transform();
        assert_eq!(t.position, pose.position);
        assert_eq!(t.rotation, pose.rotation());
    }
}
