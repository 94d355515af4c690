//! Abyss engine crate.
//!
//! Owns the window/GPU collaborators, the render-resource lifecycle and the
//! deep-zoom navigation model used by the fractal binaries.

pub mod config;
pub mod coords;
pub mod core;
pub mod device;
pub mod error;
pub mod fractal;
pub mod input;
pub mod logging;
pub mod nav;
pub mod render;
pub mod time;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{NavigationConfig, RendererConfig, WindowConfig};
pub use error::{RendererError, ShaderError, WindowError};
pub use render::{FractalRenderer, RendererState};
