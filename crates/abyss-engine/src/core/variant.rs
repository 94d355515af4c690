use crate::error::ShaderError;

use super::ctx::{FrameCtx, UniformSet};

/// Directive returned from [`FractalVariant::on_frame_start`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameDirective {
    Continue,
    /// Recompile and relink the program from `fragment_source` before drawing.
    ReloadProgram,
}

/// A concrete fractal: shader payload, uniform values and per-frame input policy.
///
/// Exactly one variant drives a renderer. Callbacks run on the render thread
/// in frame order: `on_frame_start`, `bind_uniforms`, `on_frame_end`.
pub trait FractalVariant {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fragment-stage source (WGSL, entry point `fs_main`).
    ///
    /// Called once at program creation and again for every reload the variant
    /// requests; file-backed variants re-read their file here.
    fn fragment_source(&mut self) -> Result<String, ShaderError>;

    /// Produces this frame's uniform values.
    fn bind_uniforms(&self, ctx: &FrameCtx<'_>, uniforms: &mut UniformSet);

    /// Input handling at the top of the frame, after events were polled.
    fn on_frame_start(&mut self, ctx: &FrameCtx<'_>) -> FrameDirective {
        let _ = ctx;
        FrameDirective::Continue
    }

    /// Called after the frame was presented.
    fn on_frame_end(&mut self, ctx: &FrameCtx<'_>) {
        let _ = ctx;
    }
}
