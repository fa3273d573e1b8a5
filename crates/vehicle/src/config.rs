use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Errors from vehicle setup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VehicleError {
    #[error("invalid vehicle config: {field} = {value} ({reason})")]
    InvalidConfig {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
}

/// Per-tick driving constants. All rates are per tick, not per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    /// Longitudinal velocity added per tick of throttle.
    pub acceleration: f32,
    /// Fraction of velocity removed per tick while braking.
    pub braking_force: f32,
    pub max_speed: f32,
    /// Yaw change in radians per tick of steering.
    pub turn_rate: f32,
    /// Downward velocity gained per airborne tick.
    pub gravity: f32,
    pub ground_clearance: f32,
    /// Velocity multiplier applied at the end of every tick.
    pub damping: f32,
    /// Elevation change between here and the next position above which the
    /// move is slowed.
    pub steep_threshold: f32,
    /// Movement multiplier applied on steep steps.
    pub steep_factor: f32,
    pub spawn_position: Vec3,
    pub spawn_heading: f32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            acceleration: 0.04,
            braking_force: 0.05,
            max_speed: 2.0,
            turn_rate: 0.03,
            gravity: 0.015,
            ground_clearance: 0.5,
            damping: 0.98,
            steep_threshold: 1.0,
            steep_factor: 0.5,
            spawn_position: Vec3::new(0.0, 3.0, 0.0),
            spawn_heading: std::f32::consts::FRAC_PI_2,
        }
    }
}

impl VehicleConfig {
    pub fn validate(&self) -> Result<(), VehicleError> {
        non_negative("acceleration", self.acceleration)?;
        non_negative("turn_rate", self.turn_rate)?;
        non_negative("gravity", self.gravity)?;
        non_negative("ground_clearance", self.ground_clearance)?;
        non_negative("steep_threshold", self.steep_threshold)?;
        unit_interval("braking_force", self.braking_force)?;
        unit_interval("damping", self.damping)?;
        unit_interval("steep_factor", self.steep_factor)?;
        if !self.max_speed.is_finite() || self.max_speed <= 0.0 {
            return Err(VehicleError::InvalidConfig {
                field: "max_speed",
                value: self.max_speed,
                reason: "must be finite and positive",
            });
        }
        if !self.spawn_position.is_finite() || !self.spawn_heading.is_finite() {
            return Err(VehicleError::InvalidConfig {
                field: "spawn",
                value: f32::NAN,
                reason: "spawn pose must be finite",
            });
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), VehicleError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(VehicleError::InvalidConfig {
            field,
            value,
            reason: "must be finite and non-negative",
        })
    }
}

fn unit_interval(field: &'static str, value: f32) -> Result<(), VehicleError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(VehicleError::InvalidConfig {
            field,
            value,
            reason: "must lie in [0, 1]",
        })
    }
}
