//! Renders a fixed fragment shader read once at startup.
//!
//! Usage: `shader path.wgsl` (or `ABYSS_SHADER=path.wgsl`).

use std::process::ExitCode;

use abyss_engine::fractal::{ShaderSource, StaticShader};

fn main() -> ExitCode {
    abyss_studio::launch(|| {
        let path = abyss_studio::shader_path(None)?;
        let config = abyss_studio::renderer_config("Shader")?;
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "shader".to_owned());
        abyss_studio::run(config, StaticShader::new(title, ShaderSource::File(path)))
    })
}
