use serde::{Deserialize, Serialize};

use crate::heightfield::{Heightfield, TerrainError, validate_shape};
use crate::noise_source::{NoiseSource, cell_unit};

const MOUNTAIN_SALT: u64 = 0x6d6f_756e_7461_696e;
const BUMP_SALT: u64 = 0x6275_6d70_7300_0000;

/// One noise layer: coordinates are divided by `wavelength` (in cells) and
/// the sample is scaled by `amplitude`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Octave {
    pub wavelength: f32,
    pub amplitude: f32,
}

impl Octave {
    pub const fn new(wavelength: f32, amplitude: f32) -> Self {
        Self {
            wavelength,
            amplitude,
        }
    }
}

/// Radial bump stamped onto individual cells by a rare per-cell event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MountainParams {
    /// Per-cell chance of a stamp.
    pub probability: f32,
    pub peak_height: f32,
    /// Distance (in cells) from the grid middle at which the bump reaches zero.
    pub radius: f32,
}

impl MountainParams {
    /// `max(0, (1 - d / radius) * peak)` for a cell `d` cells from the middle.
    pub fn stamp(&self, distance: f32) -> f32 {
        ((1.0 - distance / self.radius) * self.peak_height).max(0.0)
    }
}

impl Default for MountainParams {
    fn default() -> Self {
        Self {
            probability: 0.004,
            peak_height: 20.0,
            radius: 40.0,
        }
    }
}

/// Terrain shaping parameters. The default is the rolling preset: three
/// octaves, `|h|^1.5` shaping, a floor at -2 and rare mountain stamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    pub octaves: Vec<Octave>,
    /// Exponent for `sign(h) * |h|^e`; flattens small variation and steepens
    /// large features.
    pub shape_exponent: Option<f32>,
    /// Lowest allowed elevation before mountain stamps and bumps.
    pub floor: Option<f32>,
    pub mountain: Option<MountainParams>,
    /// Peak-to-peak amplitude of per-cell bump noise; 0 disables it.
    pub bump_amplitude: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            octaves: vec![
                Octave::new(50.0, 5.0),
                Octave::new(20.0, 2.0),
                Octave::new(10.0, 1.0),
            ],
            shape_exponent: Some(1.5),
            floor: Some(-2.0),
            mountain: Some(MountainParams::default()),
            bump_amplitude: 0.0,
        }
    }
}

impl TerrainParams {
    /// Unshaped octaves with mountain stamps and bump noise on top.
    pub fn classic() -> Self {
        Self {
            shape_exponent: None,
            floor: None,
            bump_amplitude: 0.5,
            ..Self::default()
        }
    }

    /// No octaves and no events: generates a flat field.
    pub fn flat() -> Self {
        Self {
            octaves: Vec::new(),
            shape_exponent: None,
            floor: None,
            mountain: None,
            bump_amplitude: 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), TerrainError> {
        for o in &self.octaves {
            if !o.wavelength.is_finite() || o.wavelength <= 0.0 {
                return Err(TerrainError::InvalidOctave(o.wavelength));
            }
        }
        if let Some(m) = &self.mountain {
            if !(0.0..=1.0).contains(&m.probability) {
                return Err(TerrainError::InvalidProbability(m.probability));
            }
        }
        Ok(())
    }
}

/// Builds heightfields from layered noise.
#[derive(Debug, Clone, Default)]
pub struct TerrainGenerator {
    params: TerrainParams,
}

impl TerrainGenerator {
    pub fn new(params: TerrainParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Generate a `resolution x resolution` heightfield spanning `size` world
    /// units. Fails fast on a degenerate grid or invalid parameters.
    pub fn generate<N: NoiseSource + ?Sized>(
        &self,
        resolution: usize,
        size: f32,
        noise: &N,
    ) -> Result<Heightfield, TerrainError> {
        let _span = tracing::info_span!("terrain_generate", resolution, size).entered();
        validate_shape(resolution, size)?;
        self.params.validate()?;

        let seed = noise.seed();
        let middle = resolution as f32 / 2.0;
        let mut stamps = 0usize;
        let mut samples = Vec::with_capacity(resolution * resolution);

        for y in 0..resolution {
            for x in 0..resolution {
                let mut h = self.octave_sum(noise, x as f32, y as f32);

                if let Some(e) = self.params.shape_exponent {
                    h = shape(h, e);
                }
                if let Some(floor) = self.params.floor {
                    h = h.max(floor);
                }
                if let Some(m) = &self.params.mountain {
                    if cell_unit(seed, x, y, MOUNTAIN_SALT) < m.probability {
                        let d = (x as f32 - middle).hypot(y as f32 - middle);
                        h += m.stamp(d);
                        stamps += 1;
                    }
                }
                if self.params.bump_amplitude != 0.0 {
                    h += (cell_unit(seed, x, y, BUMP_SALT) - 0.5) * self.params.bump_amplitude;
                }

                samples.push(h);
            }
        }

        let field = Heightfield::from_samples(resolution, size, samples)?;
        tracing::info!(
            min = field.min_height(),
            max = field.max_height(),
            mountain_stamps = stamps,
            "terrain generated"
        );
        Ok(field)
    }

    fn octave_sum<N: NoiseSource + ?Sized>(&self, noise: &N, x: f32, y: f32) -> f32 {
        self.params
            .octaves
            .iter()
            .map(|o| noise.sample(x / o.wavelength, y / o.wavelength) * o.amplitude)
            .sum()
    }
}

/// `sign(h) * |h|^exponent`
fn shape(h: f32, exponent: f32) -> f32 {
    h.abs().powf(exponent).copysign(h)
}
