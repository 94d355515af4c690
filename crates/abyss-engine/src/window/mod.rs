//! Window layer.
//!
//! - `WindowBackend`: windowing/input capability
//! - `RenderSurface`: owns the window and its context for the renderer
//! - `WinitBackend`: the winit implementation, pumped from the render loop

mod backend;
mod surface;
mod winit_backend;

pub use backend::WindowBackend;
pub use surface::RenderSurface;
pub use winit_backend::WinitBackend;
