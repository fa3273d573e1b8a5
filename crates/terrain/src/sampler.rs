use serde::{Deserialize, Serialize};

use crate::heightfield::Heightfield;

/// Elevation reported for any point off the heightfield.
pub const OUT_OF_BOUNDS_HEIGHT: f32 = 0.0;

/// Multiplier between stored samples and world elevation.
pub const DEFAULT_DISPLAY_SCALE: f32 = 2.0;

/// Anything that can answer "how high is the ground here".
///
/// Implementations must be total: every input, including non-finite and
/// off-map coordinates, yields a finite elevation.
pub trait GroundHeight {
    fn height_at(&self, x: f32, z: f32) -> f32;
}

impl<F> GroundHeight for F
where
    F: Fn(f32, f32) -> f32,
{
    fn height_at(&self, x: f32, z: f32) -> f32 {
        self(x, z)
    }
}

/// How a query point inside a cell is resolved to an elevation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleMode {
    /// Sample at the lower corner of the containing cell. No interpolation.
    #[default]
    Nearest,
    /// Interpolate the four corners of the containing cell. Smoother ground
    /// contact; the car handles differently on low-resolution terrain.
    Bilinear,
}

/// World-space elevation lookup over a heightfield centred on the origin.
#[derive(Debug, Clone)]
pub struct HeightSampler {
    field: Heightfield,
    display_scale: f32,
    mode: SampleMode,
}

impl HeightSampler {
    pub fn new(field: Heightfield) -> Self {
        Self {
            field,
            display_scale: DEFAULT_DISPLAY_SCALE,
            mode: SampleMode::Nearest,
        }
    }

    pub fn with_display_scale(mut self, scale: f32) -> Self {
        self.display_scale = scale;
        self
    }

    pub fn with_mode(mut self, mode: SampleMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn heightfield(&self) -> &Heightfield {
        &self.field
    }

    pub fn display_scale(&self) -> f32 {
        self.display_scale
    }

    pub fn mode(&self) -> SampleMode {
        self.mode
    }

    /// Scaled elevation at world `(x, z)`, or [`OUT_OF_BOUNDS_HEIGHT`] off the map.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let Some((ix, iz, fx, fz)) = self.cell_at(x, z) else {
            return OUT_OF_BOUNDS_HEIGHT;
        };
        let res = self.field.resolution();
        let s = self.field.samples();
        let raw = match self.mode {
            SampleMode::Nearest => s[iz * res + ix],
            SampleMode::Bilinear => {
                let h00 = s[iz * res + ix];
                let h10 = s[iz * res + ix + 1];
                let h01 = s[(iz + 1) * res + ix];
                let h11 = s[(iz + 1) * res + ix + 1];
                let near = h00 + (h10 - h00) * fx;
                let far = h01 + (h11 - h01) * fx;
                near + (far - near) * fz
            }
        };
        raw * self.display_scale
    }

    /// Grid cell containing world `(x, z)` and the fractional position inside
    /// it. Valid cells are `[0, resolution - 2]` on both axes so that the far
    /// corner always exists.
    fn cell_at(&self, x: f32, z: f32) -> Option<(usize, usize, f32, f32)> {
        let size = self.field.size();
        let cells = (self.field.resolution() - 1) as f32;
        let gx = (x + size / 2.0) / size * cells;
        let gz = (z + size / 2.0) / size * cells;
        if !gx.is_finite() || !gz.is_finite() {
            return None;
        }
        let (fx, fz) = (gx.floor(), gz.floor());
        if fx < 0.0 || fz < 0.0 || fx >= cells || fz >= cells {
            return None;
        }
        Some((fx as usize, fz as usize, gx - fx, gz - fz))
    }
}

impl GroundHeight for HeightSampler {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        HeightSampler::height_at(self, x, z)
    }
}
