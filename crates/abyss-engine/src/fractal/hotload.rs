use std::path::PathBuf;

use crate::core::{FractalVariant, FrameCtx, FrameDirective, UniformSet};
use crate::error::ShaderError;

use super::source::ShaderSource;

/// Live-edited fragment shader.
///
/// Re-reads its file at the top of every frame and asks for a relink when
/// the text differs from the last text it tried, so a broken edit is
/// compiled once rather than every frame. Exposes `iTime` (seconds since
/// start) and `u_resolution`.
pub struct ShaderHotload {
    source: ShaderSource,
    last_attempt: Option<String>,
    pending: Option<String>,
    unreadable: bool,
}

impl ShaderHotload {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            source: ShaderSource::file(path),
            last_attempt: None,
            pending: None,
            unreadable: false,
        }
    }

    pub fn source(&self) -> &ShaderSource {
        &self.source
    }
}

impl FractalVariant for ShaderHotload {
    fn name(&self) -> &str {
        "hotload"
    }

    fn fragment_source(&mut self) -> Result<String, ShaderError> {
        let text = match self.pending.take() {
            Some(text) => text,
            None => self.source.load()?,
        };
        self.last_attempt = Some(text.clone());
        Ok(text)
    }

    fn bind_uniforms(&self, ctx: &FrameCtx<'_>, uniforms: &mut UniformSet) {
        uniforms
            .vec2("u_resolution", ctx.resolution)
            .float("iTime", ctx.time.elapsed as f32);
    }

    fn on_frame_start(&mut self, _ctx: &FrameCtx<'_>) -> FrameDirective {
        match self.source.load() {
            Ok(text) => {
                if self.unreadable {
                    log::info!("shader source readable again");
                    self.unreadable = false;
                }
                if self.last_attempt.as_deref() == Some(text.as_str()) {
                    FrameDirective::Continue
                } else {
                    self.pending = Some(text);
                    FrameDirective::ReloadProgram
                }
            }
            Err(e) => {
                if !self.unreadable {
                    log::warn!("{e}; keeping previous program");
                    self.unreadable = true;
                }
                FrameDirective::Continue
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::UniformValue;
    use crate::input::{InputFrame, InputState};
    use crate::time::FrameTime;

    struct TempShader(PathBuf);

    impl TempShader {
        fn new(tag: &str, text: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "abyss-hotload-{tag}-{}.wgsl",
                std::process::id()
            ));
            std::fs::write(&path, text).unwrap();
            Self(path)
        }

        fn write(&self, text: &str) {
            std::fs::write(&self.0, text).unwrap();
        }
    }

    impl Drop for TempShader {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    fn start(variant: &mut ShaderHotload) -> FrameDirective {
        let input = InputState::default();
        let frame = InputFrame::default();
        let ctx = FrameCtx {
            input: &input,
            input_frame: &frame,
            time: FrameTime::fixed(0.5, 4),
            resolution: [640.0, 480.0],
        };
        variant.on_frame_start(&ctx)
    }

    #[test]
    fn unchanged_file_does_not_reload() {
        let file = TempShader::new("unchanged", "a");
        let mut hotload = ShaderHotload::new(&file.0);
        assert_eq!(hotload.fragment_source().unwrap(), "a");

        assert_eq!(start(&mut hotload), FrameDirective::Continue);
        assert_eq!(start(&mut hotload), FrameDirective::Continue);
    }

    #[test]
    fn edit_triggers_one_reload_with_new_text() {
        let file = TempShader::new("edit", "a");
        let mut hotload = ShaderHotload::new(&file.0);
        hotload.fragment_source().unwrap();

        file.write("b");
        assert_eq!(start(&mut hotload), FrameDirective::ReloadProgram);
        assert_eq!(hotload.fragment_source().unwrap(), "b");
        assert_eq!(start(&mut hotload), FrameDirective::Continue);
    }

    #[test]
    fn missing_file_keeps_running() {
        let file = TempShader::new("missing", "a");
        let mut hotload = ShaderHotload::new(&file.0);
        hotload.fragment_source().unwrap();

        std::fs::remove_file(&file.0).unwrap();
        assert_eq!(start(&mut hotload), FrameDirective::Continue);

        file.write("a");
        assert_eq!(start(&mut hotload), FrameDirective::Continue);
    }

    #[test]
    fn first_load_of_missing_file_fails() {
        let path = std::env::temp_dir().join("abyss-hotload-never-written.wgsl");
        let _ = std::fs::remove_file(&path);
        let mut hotload = ShaderHotload::new(&path);
        assert!(matches!(
            hotload.fragment_source(),
            Err(ShaderError::MissingSource { .. })
        ));
    }

    #[test]
    fn exposes_time_and_resolution() {
        let hotload = ShaderHotload::new("unused.wgsl");
        let input = InputState::default();
        let frame = InputFrame::default();
        let ctx = FrameCtx {
            input: &input,
            input_frame: &frame,
            time: FrameTime::fixed(0.5, 4),
            resolution: [640.0, 480.0],
        };
        let mut uniforms = UniformSet::new();
        hotload.bind_uniforms(&ctx, &mut uniforms);

        assert_eq!(uniforms.get("iTime"), Some(UniformValue::Float(2.0)));
        assert_eq!(
            uniforms.get("u_resolution"),
            Some(UniformValue::Vec2([640.0, 480.0]))
        );
    }
}
