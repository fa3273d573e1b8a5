use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::noise_source::SeedStream;

const RAMP_SALT: u64 = 0x7261_6d70_0000_0000;

/// Box extent of a ramp prop (length, thickness, width).
pub const RAMP_EXTENT: Vec3 = Vec3::new(8.0, 0.2, 4.0);

/// Placement of a decorative ramp. Ramps are drawn but not driven on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampPlacement {
    pub x: f32,
    pub z: f32,
    /// Tilt in radians, `[0, pi/3)`.
    pub rotation: f32,
}

/// Scatter `count` ramps over the middle 80% of a `size` map.
pub fn scatter_ramps(seed: u64, size: f32, count: usize) -> Vec<RampPlacement> {
    let mut stream = SeedStream::new(seed, RAMP_SALT);
    (0..count)
        .map(|_| RampPlacement {
            x: (stream.next_unit() - 0.5) * size * 0.8,
            z: (stream.next_unit() - 0.5) * size * 0.8,
            rotation: stream.next_unit() * std::f32::consts::FRAC_PI_3,
        })
        .collect()
}
