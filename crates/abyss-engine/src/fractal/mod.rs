//! Fractal variants.
//!
//! - `Mandelbrot`: keyboard-driven deep zoom
//! - `ShaderHotload`: fragment shader re-read from disk every frame
//! - `StaticShader`: fixed fragment shader, inline or from a file

mod hotload;
mod mandelbrot;
mod source;
mod static_shader;

pub use hotload::ShaderHotload;
pub use mandelbrot::{MANDELBROT_SHADER, Mandelbrot};
pub use source::ShaderSource;
pub use static_shader::StaticShader;
