//! Core contracts between the renderer and the pluggable fractal variants.

mod ctx;
mod variant;

pub use ctx::{FrameCtx, UniformSet};
pub use variant::{FractalVariant, FrameDirective};
