use std::collections::BTreeMap;

use carquest_common::{EntityId, Transform};
use carquest_kernel::{Frame, Session};
use carquest_terrain::{RAMP_EXTENT, TerrainMesh};
use glam::{Quat, Vec3};

/// Box extent of the car body (width, height, length).
pub const CAR_EXTENT: Vec3 = Vec3::new(2.0, 1.0, 4.0);

#[derive(Debug, Clone)]
pub enum DrawableKind {
    Terrain(TerrainMesh),
    Car { braking: bool },
    Ramp,
}

/// Something a renderer draws. Box-shaped drawables carry their extent in
/// `transform.scale`.
#[derive(Debug, Clone)]
pub struct Drawable {
    pub kind: DrawableKind,
    pub transform: Transform,
}

/// Renderer-owned copy of everything visible in a session.
///
/// Built once from a session; afterwards only the car changes, through
/// [`Scene::sync`].
#[derive(Debug, Clone)]
pub struct Scene {
    drawables: BTreeMap<EntityId, Drawable>,
    terrain: EntityId,
    car: EntityId,
    ramps: Vec<EntityId>,
    tick: u64,
}

impl Scene {
    pub fn from_session(session: &Session) -> Self {
        let sampler = session.sampler();
        let mut drawables = BTreeMap::new();

        let terrain = EntityId::new();
        let mesh = TerrainMesh::from_heightfield(sampler.heightfield(), sampler.display_scale());
        tracing::debug!(
            id = %terrain.short(),
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "terrain mesh built"
        );
        drawables.insert(
            terrain,
            Drawable {
                kind: DrawableKind::Terrain(mesh),
                transform: Transform::default(),
            },
        );

        let car = EntityId::new();
        drawables.insert(
            car,
            Drawable {
                kind: DrawableKind::Car {
                    braking: session.vehicle().is_braking(),
                },
                transform: session.pose().transform().with_scale(CAR_EXTENT),
            },
        );

        // Ramps sit on the ground and tilt about their own z axis.
        let ramps = session
            .ramps()
            .iter()
            .map(|ramp| {
                let id = EntityId::new();
                let ground = sampler.height_at(ramp.x, ramp.z);
                drawables.insert(
                    id,
                    Drawable {
                        kind: DrawableKind::Ramp,
                        transform: Transform {
                            position: Vec3::new(ramp.x, ground, ramp.z),
                            rotation: Quat::from_rotation_z(ramp.rotation),
                            scale: RAMP_EXTENT,
                        },
                    },
                );
                id
            })
            .collect();

        Self {
            drawables,
            terrain,
            car,
            ramps,
            tick: session.tick(),
        }
    }

    /// Copy the frame's car pose into the car drawable. A frame that is not
    /// newer than the last synced one is ignored.
    pub fn sync(&mut self, frame: &Frame) {
        if frame.tick <= self.tick {
            tracing::trace!(tick = frame.tick, "frame already synced");
            return;
        }
        if let Some(car) = self.drawables.get_mut(&self.car) {
            car.transform = frame.pose.transform().with_scale(CAR_EXTENT);
            car.kind = DrawableKind::Car {
                braking: frame.braking,
            };
        }
        self.tick = frame.tick;
    }

    /// Tick of the last synced frame.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn get(&self, id: EntityId) -> Option<&Drawable> {
        self.drawables.get(&id)
    }

    pub fn car_id(&self) -> EntityId {
        self.car
    }

    pub fn terrain_id(&self) -> EntityId {
        self.terrain
    }

    pub fn ramp_ids(&self) -> &[EntityId] {
        &self.ramps
    }

    pub fn car(&self) -> Option<&Drawable> {
        self.get(self.car)
    }

    pub fn terrain_mesh(&self) -> Option<&TerrainMesh> {
        match &self.get(self.terrain)?.kind {
            DrawableKind::Terrain(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &Drawable)> {
        self.drawables.iter()
    }
}
