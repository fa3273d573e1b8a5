//! Rendering adapter: the boundary between the session and whatever draws it.
//!
//! # Invariants
//! - Renderers read a [`Scene`] and a [`RenderView`]; they never touch the session.
//! - The car drawable is rewritten from the vehicle pose exactly once per frame.

mod renderer;
mod scene;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};
pub use scene::{CAR_EXTENT, Drawable, DrawableKind, Scene};

pub fn crate_info() -> &'static str {
    "carquest-render v0.1.0"
}
