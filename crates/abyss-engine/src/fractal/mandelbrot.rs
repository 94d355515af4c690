use crate::config::NavigationConfig;
use crate::coords::DVec2;
use crate::core::{FractalVariant, FrameCtx, FrameDirective, UniformSet};
use crate::error::ShaderError;
use crate::input::Key;
use crate::nav::NavigationState;

pub const MANDELBROT_SHADER: &str = include_str!("shaders/mandelbrot.wgsl");

/// Deep-zoom Mandelbrot explorer.
///
/// W/S zoom in/out, arrow keys pan, P logs the current view. Movement is
/// scaled by frame time so speed does not depend on the frame rate.
pub struct Mandelbrot {
    config: NavigationConfig,
    nav: NavigationState,
}

impl Mandelbrot {
    pub fn new(config: NavigationConfig) -> Self {
        let nav = NavigationState::new(&config);
        Self { config, nav }
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    fn iterations(&self) -> i32 {
        self.nav
            .iteration_count(self.config.iteration_base, self.config.iteration_slope)
    }

    fn dump_view(&self) {
        let view = self.nav.view_center();
        log::info!(
            "view center ({:.17e}, {:.17e}) anchor ({:.17e}, {:.17e}) center ({:.6e}, {:.6e}) scale {:.6e} iterations {}",
            view.x,
            view.y,
            self.nav.anchor().x,
            self.nav.anchor().y,
            self.nav.center().x,
            self.nav.center().y,
            self.nav.scale(),
            self.iterations()
        );
    }
}

impl Default for Mandelbrot {
    fn default() -> Self {
        Self::new(NavigationConfig::default())
    }
}

impl FractalVariant for Mandelbrot {
    fn name(&self) -> &str {
        "mandelbrot"
    }

    fn fragment_source(&mut self) -> Result<String, ShaderError> {
        Ok(MANDELBROT_SHADER.to_owned())
    }

    fn bind_uniforms(&self, ctx: &FrameCtx<'_>, uniforms: &mut UniformSet) {
        let width = f64::from(ctx.resolution[0].max(1.0));
        let (center, center_low) = self.nav.view_center().split_f32();
        uniforms
            .vec2("u_resolution", ctx.resolution)
            .vec2("u_center", center)
            .vec2("u_centerLow", center_low)
            .float("u_scale", (self.nav.scale() / width) as f32)
            .int("u_maxIterations", self.iterations());
    }

    fn on_frame_start(&mut self, ctx: &FrameCtx<'_>) -> FrameDirective {
        let frames = ctx.frame_factor(self.config.reference_frame_rate);

        if ctx.key_down(Key::W) {
            self.nav.zoom(self.config.zoom_ratio.powf(frames));
        }
        if ctx.key_down(Key::S) {
            self.nav.zoom(self.config.zoom_ratio.powf(-frames));
        }

        let step = self
            .nav
            .pan_step(self.config.base_pan_step, self.config.min_pan_step)
            * frames;
        let mut delta = DVec2::zero();
        if ctx.key_down(Key::ArrowUp) {
            delta.y += step;
        }
        if ctx.key_down(Key::ArrowDown) {
            delta.y -= step;
        }
        if ctx.key_down(Key::ArrowLeft) {
            delta.x -= step;
        }
        if ctx.key_down(Key::ArrowRight) {
            delta.x += step;
        }
        if delta != DVec2::zero() {
            self.nav.pan(delta, self.config.recenter_threshold);
        }

        if ctx.key_pressed(Key::P) {
            self.dump_view();
        }

        FrameDirective::Continue
    }
}
