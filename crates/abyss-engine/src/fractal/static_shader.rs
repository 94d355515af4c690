use crate::core::{FractalVariant, FrameCtx, UniformSet};
use crate::error::ShaderError;

use super::source::ShaderSource;

/// Fixed fragment shader loaded once at program creation.
///
/// Receives `u_resolution` and `iTime`; takes no input.
pub struct StaticShader {
    name: String,
    source: ShaderSource,
}

impl StaticShader {
    pub fn new(name: impl Into<String>, source: ShaderSource) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }
}

impl FractalVariant for StaticShader {
    fn name(&self) -> &str {
        &self.name
    }

    fn fragment_source(&mut self) -> Result<String, ShaderError> {
        self.source.load()
    }

    fn bind_uniforms(&self, ctx: &FrameCtx<'_>, uniforms: &mut UniformSet) {
        uniforms
            .vec2("u_resolution", ctx.resolution)
            .float("iTime", ctx.time.elapsed as f32);
    }
}
