use std::fmt;

use crate::config::WindowConfig;
use crate::device::GpuBackend;
use crate::error::WindowError;
use crate::input::{InputFrame, InputState};

/// Windowing/input capability.
///
/// Calls on a handle are only valid between a successful `create_window` and
/// the matching `destroy_window`. `RenderSurface` enforces that ordering.
pub trait WindowBackend {
    type Handle: Copy + Eq + fmt::Debug;

    /// Command backend produced by making a window's context current.
    type Gpu: GpuBackend;

    /// Brings up the backend. Fails with `WindowError::Init`.
    fn init(&mut self) -> Result<(), WindowError>;

    /// Creates the window. Fails with `WindowError::Create`; the backend stays initialized.
    fn create_window(&mut self, config: &WindowConfig) -> Result<Self::Handle, WindowError>;

    /// Makes the window's context current and returns its command backend.
    fn make_current(&mut self, handle: Self::Handle) -> Result<Self::Gpu, WindowError>;

    /// Drains pending events into the input state. Clears the previous frame's deltas first.
    fn poll_events(&mut self);

    /// Held keys and per-poll transitions for `handle`.
    fn input(&self, handle: Self::Handle) -> (&InputState, &InputFrame);

    fn should_close(&self, handle: Self::Handle) -> bool;
    fn request_close(&mut self, handle: Self::Handle);

    /// Drawable size in physical pixels.
    fn framebuffer_size(&self, handle: Self::Handle) -> (u32, u32);

    /// Presents the frame recorded since the last swap.
    fn swap_buffers(&mut self, handle: Self::Handle);

    fn destroy_window(&mut self, handle: Self::Handle);
    fn shutdown(&mut self);
}
