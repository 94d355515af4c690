//! Shared startup for the abyss binaries: logging, environment overrides and
//! the run/report wrapper.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow, bail};

use abyss_engine::core::FractalVariant;
use abyss_engine::logging::{LoggingConfig, init_logging};
use abyss_engine::window::WinitBackend;
use abyss_engine::{FractalRenderer, RendererConfig};

/// Fragment shader path override.
pub const SHADER_ENV: &str = "ABYSS_SHADER";

/// Window size override, `WIDTHxHEIGHT`.
pub const WINDOW_SIZE_ENV: &str = "ABYSS_WINDOW_SIZE";

/// Parses `WIDTHxHEIGHT` (e.g. `1280x720`).
pub fn parse_size(text: &str) -> Result<(u32, u32)> {
    let (w, h) = text
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("expected WIDTHxHEIGHT, got `{text}`"))?;
    let width: u32 = w.trim().parse().with_context(|| format!("bad width `{w}`"))?;
    let height: u32 = h.trim().parse().with_context(|| format!("bad height `{h}`"))?;
    if width == 0 || height == 0 {
        bail!("window size must be non-zero, got {width}x{height}");
    }
    Ok((width, height))
}

/// Default config with `title` and the `ABYSS_WINDOW_SIZE` override applied.
pub fn renderer_config(title: &str) -> Result<RendererConfig> {
    let mut config = RendererConfig::default().with_title(title);
    if let Ok(size) = env::var(WINDOW_SIZE_ENV) {
        let (width, height) =
            parse_size(&size).with_context(|| format!("invalid {WINDOW_SIZE_ENV}"))?;
        config = config.with_size(width, height);
    }
    Ok(config)
}

/// Shader path from the first argument, then `ABYSS_SHADER`, then `fallback`.
pub fn shader_path(fallback: Option<&str>) -> Result<PathBuf> {
    pick_shader_path(env::args().nth(1), env::var(SHADER_ENV).ok(), fallback)
}

fn pick_shader_path(
    arg: Option<String>,
    var: Option<String>,
    fallback: Option<&str>,
) -> Result<PathBuf> {
    arg.or(var)
        .or_else(|| fallback.map(str::to_owned))
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("no shader given: pass a path or set {SHADER_ENV}"))
}

/// Opens the window and runs `variant` until it is closed.
pub fn run(config: RendererConfig, variant: impl FractalVariant + 'static) -> Result<()> {
    let title = config.window.title.clone();
    let mut renderer = FractalRenderer::new(WinitBackend::new(), Box::new(variant), config);
    renderer
        .run()
        .with_context(|| format!("{title} failed"))
}

/// Initializes logging, runs `main` and maps its outcome to an exit code.
pub fn launch(main: impl FnOnce() -> Result<()>) -> ExitCode {
    init_logging(LoggingConfig::default());
    match main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
