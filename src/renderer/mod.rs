//! Rendering module
//!
//! `scene` turns state into flat-colored triangles, `pipeline` draws them
//! with wgpu, `hud` produces the text the page shows on top.

pub mod hud;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use hud::{HudView, Overlay};
pub use pipeline::{RenderInitError, RenderState};
pub use scene::build_scene;
pub use vertex::Vertex;
