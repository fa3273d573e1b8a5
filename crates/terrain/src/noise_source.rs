use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// A seeded 2D noise function sampled by the terrain generator.
///
/// `sample` must be a pure function of its arguments and the seed, returning
/// values in `[-1, 1]`. The seed is also used for per-cell events (mountain
/// stamps, bumps) so one number reproduces the whole heightfield.
pub trait NoiseSource {
    fn sample(&self, nx: f32, ny: f32) -> f32;
    fn seed(&self) -> u64;
}

/// Hash noise: every distinct pair of scaled coordinates maps to an
/// independent pseudo-random value. Produces rough, faceted terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashNoise {
    seed: u64,
}

impl HashNoise {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl NoiseSource for HashNoise {
    fn sample(&self, nx: f32, ny: f32) -> f32 {
        let h = hash_pair(self.seed, canonical_bits(nx), canonical_bits(ny));
        unit(h) * 2.0 - 1.0
    }

    fn seed(&self) -> u64 {
        self.seed
    }
}

/// Smooth gradient noise backed by the `noise` crate.
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    seed: u64,
    perlin: Perlin,
}

impl PerlinNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            // Perlin takes a 32-bit seed; fold the high half in.
            perlin: Perlin::new((seed ^ (seed >> 32)) as u32),
        }
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, nx: f32, ny: f32) -> f32 {
        (self.perlin.get([nx as f64, ny as f64]) as f32).clamp(-1.0, 1.0)
    }

    fn seed(&self) -> u64 {
        self.seed
    }
}

/// Noise source selector for configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseKind {
    #[default]
    Hash,
    Perlin,
}

impl NoiseKind {
    pub fn build(self, seed: u64) -> Box<dyn NoiseSource> {
        match self {
            Self::Hash => Box::new(HashNoise::new(seed)),
            Self::Perlin => Box::new(PerlinNoise::new(seed)),
        }
    }
}

/// Uniform value in `[0, 1)` for grid cell `(x, y)`, independent per `salt`.
pub(crate) fn cell_unit(seed: u64, x: usize, y: usize, salt: u64) -> f32 {
    unit(hash_pair(seed ^ salt, x as u32, y as u32))
}

/// Deterministic stream of uniform values, used for prop scattering.
pub(crate) struct SeedStream {
    state: u64,
}

impl SeedStream {
    pub(crate) fn new(seed: u64, salt: u64) -> Self {
        Self { state: seed ^ salt }
    }

    /// Next value in `[0, 1)`.
    pub(crate) fn next_unit(&mut self) -> f32 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        unit(mix(self.state))
    }
}

fn hash_pair(seed: u64, a: u32, b: u32) -> u64 {
    splitmix64(seed ^ splitmix64(((a as u64) << 32) | b as u64))
}

// -0.0 and 0.0 must land on the same value.
fn canonical_bits(v: f32) -> u32 {
    if v == 0.0 { 0 } else { v.to_bits() }
}

/// Top 24 bits as a float in `[0, 1)`; exact in f32.
fn unit(h: u64) -> f32 {
    (h >> 40) as f32 / (1u64 << 24) as f32
}

/// Splitmix64 step: advance then mix.
fn splitmix64(state: u64) -> u64 {
    mix(state.wrapping_add(0x9e37_79b9_7f4a_7c15))
}

fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
