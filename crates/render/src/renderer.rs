use carquest_kernel::Frame;
use glam::Vec3;

use crate::scene::{DrawableKind, Scene};

/// Where the renderer looks from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
}

impl RenderView {
    /// View for a stepped frame: the chase (or orbit) camera placement.
    pub fn from_frame(frame: &Frame, fov_degrees: f32) -> Self {
        Self {
            eye: frame.camera.position,
            target: frame.camera.look_at,
            fov_degrees,
        }
    }
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 5.0, 15.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
        }
    }
}

/// Anything that can draw a scene. Renderers only read; the session owns
/// the truth and the scene owns the copy.
pub trait Renderer {
    type Output;

    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Renders a scene as plain text. Used by the CLI and in tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Scene (tick={}, drawables={}) ===\n",
            scene.tick(),
            scene.len()
        ));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));

        if let Some(mesh) = scene.terrain_mesh() {
            out.push_str(&format!(
                "Terrain: {} vertices, {} triangles\n",
                mesh.vertex_count(),
                mesh.triangle_count()
            ));
        }
        if let Some(car) = scene.car() {
            let p = car.transform.position;
            let facing = car.transform.rotation * Vec3::Z;
            let braking = matches!(car.kind, DrawableKind::Car { braking: true });
            out.push_str(&format!(
                "Car [{}]: pos=({:.2}, {:.2}, {:.2}) yaw={:.3} brake_lights={}\n",
                scene.car_id().short(),
                p.x,
                p.y,
                p.z,
                facing.x.atan2(facing.z),
                if braking { "on" } else { "off" }
            ));
        }
        out.push_str(&format!("Ramps: {}\n", scene.ramp_ids().len()));
        for id in scene.ramp_ids() {
            if let Some(ramp) = scene.get(*id) {
                let p = ramp.transform.position;
                out.push_str(&format!(
                    "  [{}] pos=({:.2}, {:.2}, {:.2})\n",
                    id.short(),
                    p.x,
                    p.y,
                    p.z
                ));
            }
        }
        out
    }
}
