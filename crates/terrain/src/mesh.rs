use glam::Vec3;

use crate::heightfield::Heightfield;

/// Triangulated grid ready to hand to a renderer.
///
/// Vertex `(i, j)` sits at world `(-size/2 + i * step, h * scale, -size/2 + j * step)`,
/// the same placement [`crate::HeightSampler`] assumes, so the car rests on
/// what is drawn.
#[derive(Debug, Clone, Default)]
pub struct TerrainMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    pub fn from_heightfield(field: &Heightfield, display_scale: f32) -> Self {
        let res = field.resolution();
        let step = field.element_size();
        let half = field.size() / 2.0;

        let positions: Vec<Vec3> = field
            .samples()
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let (x, z) = (i % res, i / res);
                Vec3::new(
                    -half + x as f32 * step,
                    h * display_scale,
                    -half + z as f32 * step,
                )
            })
            .collect();

        let mut indices = Vec::with_capacity((res - 1) * (res - 1) * 6);
        for z in 0..res - 1 {
            for x in 0..res - 1 {
                let a = (z * res + x) as u32;
                let b = a + 1;
                let c = a + res as u32;
                let d = c + 1;
                // Counter-clockwise seen from +Y.
                indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        let normals = vertex_normals(&positions, &indices);
        Self {
            positions,
            normals,
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Area-weighted average of adjacent face normals.
fn vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    normals
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
        .collect()
}
