//! Terrain: procedural heightfield generation and ground-height queries.
//!
//! # Invariants
//! - A `Heightfield` always holds exactly `resolution * resolution` samples.
//! - Generation is a pure function of noise source, seed, parameters and grid shape.
//! - Height queries never fail; off-map points return [`OUT_OF_BOUNDS_HEIGHT`].
//!
//! The display multiplier is applied by [`HeightSampler`] and [`TerrainMesh`]
//! only, so physics and rendering agree on elevation.

mod generator;
mod heightfield;
mod mesh;
mod noise_source;
mod props;
mod sampler;

pub use generator::{MountainParams, Octave, TerrainGenerator, TerrainParams};
pub use heightfield::{Heightfield, MAX_RESOLUTION, TerrainError};
pub use mesh::TerrainMesh;
pub use noise_source::{HashNoise, NoiseKind, NoiseSource, PerlinNoise};
pub use props::{RAMP_EXTENT, RampPlacement, scatter_ramps};
pub use sampler::{
    DEFAULT_DISPLAY_SCALE, GroundHeight, HeightSampler, OUT_OF_BOUNDS_HEIGHT, SampleMode,
};

pub fn crate_info() -> &'static str {
    "carquest-terrain v0.1.0"
}
