use carquest_terrain::GroundHeight;
use glam::Vec3;

use crate::config::{VehicleConfig, VehicleError};
use crate::pose::VehiclePose;

/// Driver controls sampled at the start of a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveControls {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub brake: bool,
}

/// Change of ground contact during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundTransition {
    Landed,
    LeftGround,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub grounded: bool,
    pub transition: Option<GroundTransition>,
    pub braking: bool,
    /// The look-ahead found a steep step and movement was reduced.
    pub slope_limited: bool,
    /// Ground elevation under the car at the start of the tick.
    pub terrain_height: f32,
}

/// Integrates driver input into the car pose, one fixed tick at a time.
///
/// Ground contact is decided each tick by comparing the car's height with
/// `terrain + ground_clearance`; there is no collision shape.
#[derive(Debug, Clone)]
pub struct VehicleController {
    config: VehicleConfig,
    pose: VehiclePose,
    braking: bool,
    grounded: bool,
}

impl VehicleController {
    /// Controller at the configured spawn pose, at rest.
    pub fn new(config: VehicleConfig) -> Result<Self, VehicleError> {
        let pose = VehiclePose::at_rest(config.spawn_position, config.spawn_heading);
        Self::with_pose(config, pose)
    }

    pub fn with_pose(config: VehicleConfig, pose: VehiclePose) -> Result<Self, VehicleError> {
        config.validate()?;
        Ok(Self {
            config,
            pose,
            braking: false,
            grounded: false,
        })
    }

    pub fn pose(&self) -> &VehiclePose {
        &self.pose
    }

    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    /// Brake held during the last tick. Drives brake lights.
    pub fn is_braking(&self) -> bool {
        self.braking
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Advance one tick.
    pub fn tick<G: GroundHeight + ?Sized>(
        &mut self,
        controls: &DriveControls,
        ground: &G,
    ) -> TickReport {
        let cfg = &self.config;
        let pose = &mut self.pose;
        let was_grounded = self.grounded;

        // Ground contact.
        let terrain = ground.height_at(pose.position.x, pose.position.z);
        let rest_height = terrain + cfg.ground_clearance;
        let grounded = pose.position.y - rest_height <= 0.0;
        if grounded {
            pose.position.y = rest_height;
            pose.velocity.y = pose.velocity.y.max(0.0);
        } else {
            pose.velocity.y -= cfg.gravity;
        }

        // Throttle and steering. Steering ignores speed.
        if controls.forward {
            pose.velocity.z -= cfg.acceleration;
        }
        if controls.backward {
            pose.velocity.z += cfg.acceleration;
        }
        if controls.turn_left {
            pose.heading += cfg.turn_rate;
        }
        if controls.turn_right {
            pose.heading -= cfg.turn_rate;
        }

        if controls.brake {
            pose.velocity *= 1.0 - cfg.braking_force;
        }
        self.braking = controls.brake;

        pose.velocity = clamp_speed(pose.velocity, cfg.max_speed);

        let mut movement = pose.forward() * pose.velocity.z;

        let ahead = ground.height_at(
            pose.position.x + movement.x,
            pose.position.z + movement.z,
        );
        let slope_limited = (ahead - terrain).abs() > cfg.steep_threshold;
        if slope_limited {
            movement *= cfg.steep_factor;
        }

        pose.position += movement;
        pose.position.y += pose.velocity.y;

        pose.velocity *= cfg.damping;

        let transition = match (was_grounded, grounded) {
            (false, true) => Some(GroundTransition::Landed),
            (true, false) => Some(GroundTransition::LeftGround),
            _ => None,
        };
        if let Some(t) = transition {
            tracing::debug!(?t, y = pose.position.y, terrain, "ground contact changed");
        }
        tracing::trace!(
            x = pose.position.x,
            y = pose.position.y,
            z = pose.position.z,
            speed = pose.velocity.length(),
            "vehicle tick"
        );
        self.grounded = grounded;

        TickReport {
            grounded,
            transition,
            braking: self.braking,
            slope_limited,
            terrain_height: terrain,
        }
    }
}

/// Rescale `velocity` to `max_speed` when it is longer, keeping direction.
pub(crate) fn clamp_speed(velocity: Vec3, max_speed: f32) -> Vec3 {
    velocity.clamp_length_max(max_speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn flat(_x: f32, _z: f32) -> f32 {
        0.0
    }

    fn config() -> VehicleConfig {
        VehicleConfig::default()
    }

    /// Controller resting on flat ground, facing +Z.
    fn resting(velocity: Vec3) -> VehicleController {
        let pose = VehiclePose {
            position: Vec3::new(0.0, config().ground_clearance, 0.0),
            heading: 0.0,
            velocity,
        };
        VehicleController::with_pose(config(), pose).unwrap()
    }

    #[test]
    fn spawns_at_configured_pose() {
        let c = VehicleController::new(config()).unwrap();
        assert_eq!(c.pose().position, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(c.pose().heading, std::f32::consts::FRAC_PI_2);
        assert_eq!(c.pose().velocity, Vec3::ZERO);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = VehicleConfig {
            max_speed: -1.0,
            ..config()
        };
        assert!(VehicleController::new(cfg).is_err());
    }

    #[test]
    fn throttle_moves_along_negative_local_z_each_tick() {
        let mut c = resting(Vec3::ZERO);
        let controls = DriveControls {
            forward: true,
            ..Default::default()
        };
        let mut last_z = c.pose().position.z;
        for _ in 0..300 {
            c.tick(&controls, &flat);
            let z = c.pose().position.z;
            assert!(z < last_z, "z did not decrease: {z} >= {last_z}");
            assert!(c.pose().speed() <= config().max_speed);
            last_z = z;
        }
        // Steady state: throttle and damping balance below the speed cap.
        let steady = config().acceleration * config().damping / (1.0 - config().damping);
        assert!((c.pose().velocity.z + steady).abs() < 0.05);
    }

    #[test]
    fn reverse_moves_along_positive_local_z() {
        let mut c = resting(Vec3::ZERO);
        let controls = DriveControls {
            backward: true,
            ..Default::default()
        };
        c.tick(&controls, &flat);
        assert!(c.pose().position.z > 0.0);
    }

    #[test]
    fn falls_under_gravity_then_lands() {
        let pose = VehiclePose::at_rest(Vec3::new(0.0, 3.0, 0.0), 0.0);
        let mut c = VehicleController::with_pose(config(), pose).unwrap();
        let report = c.tick(&DriveControls::default(), &flat);
        assert!(!report.grounded);
        assert!((c.pose().velocity.y + config().gravity * config().damping).abs() < 1e-6);

        let mut landed = false;
        for _ in 0..200 {
            let r = c.tick(&DriveControls::default(), &flat);
            if r.transition == Some(GroundTransition::Landed) {
                landed = true;
                assert!(c.pose().velocity.y >= 0.0);
                break;
            }
        }
        assert!(landed, "car never landed");
        assert!(c.is_grounded());
        assert_eq!(c.pose().position.y, config().ground_clearance);
    }

    #[test]
    fn pivots_while_stationary() {
        let mut c = resting(Vec3::ZERO);
        let controls = DriveControls {
            turn_left: true,
            ..Default::default()
        };
        c.tick(&controls, &flat);
        assert!((c.pose().heading - config().turn_rate).abs() < 1e-6);
        assert_eq!(c.pose().position.x, 0.0);
        assert_eq!(c.pose().position.z, 0.0);

        let controls = DriveControls {
            turn_right: true,
            ..Default::default()
        };
        c.tick(&controls, &flat);
        c.tick(&controls, &flat);
        assert!((c.pose().heading + config().turn_rate).abs() < 1e-6);
    }

    #[test]
    fn brake_flag_tracks_input() {
        let mut c = resting(Vec3::new(0.0, 0.0, -1.0));
        let brake = DriveControls {
            brake: true,
            ..Default::default()
        };
        assert!(c.tick(&brake, &flat).braking);
        assert!(c.is_braking());
        c.tick(&DriveControls::default(), &flat);
        assert!(!c.is_braking());
    }

    #[test]
    fn steep_step_halves_movement() {
        let cliff = |_x: f32, z: f32| if z < -0.02 { 3.0 } else { 0.0 };
        let mut c = resting(Vec3::ZERO);
        let controls = DriveControls {
            forward: true,
            ..Default::default()
        };
        let report = c.tick(&controls, &cliff);
        assert!(report.slope_limited);
        assert!((c.pose().position.z + 0.02).abs() < 1e-6);
    }

    #[test]
    fn gentle_slope_is_not_limited() {
        let ramp = |_x: f32, z: f32| -z * 0.1;
        let mut c = resting(Vec3::ZERO);
        let controls = DriveControls {
            forward: true,
            ..Default::default()
        };
        let report = c.tick(&controls, &ramp);
        assert!(!report.slope_limited);
        assert!((c.pose().position.z + config().acceleration).abs() < 1e-6);
    }

    #[test]
    fn velocity_decays_without_snapping_to_zero() {
        let mut c = resting(Vec3::new(0.0, 0.0, -0.001));
        for _ in 0..100 {
            c.tick(&DriveControls::default(), &flat);
        }
        let vz = c.pose().velocity.z;
        assert!(vz < 0.0 && vz > -0.001);
    }

    #[test]
    fn clamp_speed_preserves_direction() {
        let v = clamp_speed(Vec3::new(0.0, 3.0, -4.0), 2.0);
        assert!((v.length() - 2.0).abs() < 1e-5);
        assert!((v.normalize() - Vec3::new(0.0, 0.6, -0.8)).length() < 1e-5);
        assert_eq!(clamp_speed(Vec3::new(0.0, 0.0, 1.0), 2.0), Vec3::new(0.0, 0.0, 1.0));
    }

    fn controls_strategy() -> impl Strategy<Value = DriveControls> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(forward, backward, turn_left, turn_right, brake)| DriveControls {
                forward,
                backward,
                turn_left,
                turn_right,
                brake,
            },
        )
    }

    proptest! {
        #[test]
        fn clamp_never_exceeds_max_speed(
            vy in -1e6f32..1e6,
            vz in -1e6f32..1e6,
            max in 0.01f32..100.0,
        ) {
            let v = clamp_speed(Vec3::new(0.0, vy, vz), max);
            prop_assert!(v.length() <= max * (1.0 + 1e-5));
        }

        #[test]
        fn tick_never_exceeds_max_speed(
            vy in -50f32..50.0,
            vz in -50f32..50.0,
            y in -5f32..5.0,
            controls in controls_strategy(),
        ) {
            let pose = VehiclePose { position: Vec3::new(0.0, y, 0.0), heading: 0.0, velocity: Vec3::new(0.0, vy, vz) };
            let mut c = VehicleController::with_pose(config(), pose).unwrap();
            c.tick(&controls, &flat);
            prop_assert!(c.pose().speed() <= config().max_speed * (1.0 + 1e-5));
        }

        #[test]
        fn braking_shrinks_speed_without_reversing(
            vy in 0f32..3.0,
            vz in -3f32..3.0,
        ) {
            let mut c = resting(Vec3::new(0.0, vy, vz));
            let before = c.pose().velocity;
            let brake = DriveControls { brake: true, ..Default::default() };
            c.tick(&brake, &flat);
            let after = c.pose().velocity;
            prop_assert!(after.length() <= before.length());
            prop_assert!(after.z * before.z >= 0.0);
            prop_assert!(after.y >= 0.0);
        }

        #[test]
        fn landing_cancels_downward_velocity(
            vy in -10f32..0.0,
            below in 0f32..3.0,
            ground in -5f32..5.0,
        ) {
            let surface = move |_x: f32, _z: f32| ground;
            let pose = VehiclePose {
                position: Vec3::new(0.0, ground + config().ground_clearance - below, 0.0),
                heading: 0.0,
                velocity: Vec3::new(0.0, vy, 0.0),
            };
            let mut c = VehicleController::with_pose(config(), pose).unwrap();
            let report = c.tick(&DriveControls::default(), &surface);
            prop_assert!(report.grounded);
            prop_assert!(c.pose().velocity.y >= 0.0);
            prop_assert!(c.pose().position.y >= ground + config().ground_clearance - 1e-4);
        }
    }
}
