//! Deep-zoom Mandelbrot explorer.
//!
//! W/S zoom, arrow keys pan, P prints the view, Escape quits.

use std::process::ExitCode;

use abyss_engine::fractal::Mandelbrot;

fn main() -> ExitCode {
    abyss_studio::launch(|| {
        let config = abyss_studio::renderer_config("Mandelbrot")?;
        let variant = Mandelbrot::new(config.navigation.clone());
        abyss_studio::run(config, variant)
    })
}
