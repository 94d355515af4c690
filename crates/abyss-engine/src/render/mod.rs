//! Render layer: the linked program, the full-screen quad and the
//! orchestrator that ties them to a window and a fractal variant.

mod geometry;
mod program;
mod renderer;

pub use geometry::{QUAD_INDICES, QUAD_VERTICES, QuadGeometry, QuadVertex};
pub use program::{QUAD_VERTEX_SHADER, ShaderProgram};
pub use renderer::{FractalRenderer, RendererState};

