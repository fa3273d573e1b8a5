/// Largest accepted samples-per-edge; bounds memory at 16 MiB of samples.
pub const MAX_RESOLUTION: usize = 2048;

/// Errors from heightfield construction and terrain generation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    #[error("resolution must be at least 2 samples per edge, got {0}")]
    InvalidResolution(usize),
    #[error("resolution {resolution} exceeds maximum {max}")]
    TooLarge { resolution: usize, max: usize },
    #[error("terrain size must be finite and positive, got {0}")]
    InvalidSize(f32),
    #[error("expected {expected} samples, got {actual}")]
    SampleCount { expected: usize, actual: usize },
    #[error("octave wavelength must be finite and positive, got {0}")]
    InvalidOctave(f32),
    #[error("mountain probability must lie in [0, 1], got {0}")]
    InvalidProbability(f32),
}

/// Square grid of elevation samples spanning `size` world units per edge.
///
/// Row-major: sample `(x, y)` lives at `y * resolution + x`. Immutable once
/// built.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightfield {
    resolution: usize,
    size: f32,
    samples: Vec<f32>,
}

impl Heightfield {
    /// Wrap existing samples, checking the grid shape.
    pub fn from_samples(
        resolution: usize,
        size: f32,
        samples: Vec<f32>,
    ) -> Result<Self, TerrainError> {
        validate_shape(resolution, size)?;
        let expected = resolution * resolution;
        if samples.len() != expected {
            return Err(TerrainError::SampleCount {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            resolution,
            size,
            samples,
        })
    }

    /// A heightfield with every sample at zero.
    pub fn flat(resolution: usize, size: f32) -> Result<Self, TerrainError> {
        validate_shape(resolution, size)?;
        Ok(Self {
            resolution,
            size,
            samples: vec![0.0; resolution * resolution],
        })
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample at grid cell `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.resolution || y >= self.resolution {
            return None;
        }
        Some(self.samples[y * self.resolution + x])
    }

    /// World distance between adjacent samples; what a heightfield collider
    /// calls the element size.
    pub fn element_size(&self) -> f32 {
        self.size / (self.resolution - 1) as f32
    }

    pub fn min_height(&self) -> f32 {
        self.samples.iter().copied().fold(f32::INFINITY, f32::min)
    }

    pub fn max_height(&self) -> f32 {
        self.samples.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn mean_height(&self) -> f32 {
        self.samples.iter().sum::<f32>() / self.samples.len() as f32
    }
}

pub(crate) fn validate_shape(resolution: usize, size: f32) -> Result<(), TerrainError> {
    if resolution < 2 {
        return Err(TerrainError::InvalidResolution(resolution));
    }
    if resolution > MAX_RESOLUTION {
        return Err(TerrainError::TooLarge {
            resolution,
            max: MAX_RESOLUTION,
        });
    }
    if !size.is_finite() || size <= 0.0 {
        return Err(TerrainError::InvalidSize(size));
    }
    Ok(())
}
