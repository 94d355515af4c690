//! Live shader editing: the fragment shader is re-read every frame and
//! relinked when it changes. Broken edits keep the last working program.
//!
//! Usage: `hotload [path.wgsl]` (or `ABYSS_SHADER=path.wgsl`).

use std::process::ExitCode;

use abyss_engine::fractal::ShaderHotload;

const SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/hotload.wgsl");

fn main() -> ExitCode {
    abyss_studio::launch(|| {
        let path = abyss_studio::shader_path(Some(SAMPLE))?;
        log::info!("watching {}", path.display());
        let config = abyss_studio::renderer_config("ShaderHotloading")?;
        abyss_studio::run(config, ShaderHotload::new(path))
    })
}
