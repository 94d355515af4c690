//! Renderer configuration.
//!
//! Everything here has a `Default`: a 1920x1080 undecorated window and the
//! Mandelbrot navigation constants.

use std::time::Duration;

/// Window creation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub decorated: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "abyss".to_string(),
            width: 1920,
            height: 1080,
            decorated: false,
        }
    }
}

/// Navigation constants for the zoomable variants.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationConfig {
    /// Initial view half-width in fractal-space units.
    pub initial_scale: f64,

    /// Initial coarse offset (the Mandelbrot set's visual center).
    pub initial_anchor: (f64, f64),

    /// Scale multiplier applied per reference frame while zooming in.
    pub zoom_ratio: f64,

    /// Pan step before the zoom-depth correction.
    pub base_pan_step: f64,

    /// Floor for the pan step at extreme zoom.
    pub min_pan_step: f64,

    pub iteration_base: f64,
    pub iteration_slope: f64,

    /// Upper bound for the dynamic iteration count.
    pub iteration_cap: i32,

    /// Frame rate at which one frame applies exactly one zoom ratio / pan step.
    ///
    /// Movement is scaled by `dt * reference_frame_rate`.
    pub reference_frame_rate: f64,

    /// `|center|` beyond which a pan folds the fine offset into the anchor.
    pub recenter_threshold: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            initial_scale: 5.0,
            initial_anchor: (-0.5, 0.0),
            zoom_ratio: 0.9,
            base_pan_step: 0.01,
            min_pan_step: 1e-7,
            iteration_base: 300.0,
            iteration_slope: 50.0,
            iteration_cap: 1000,
            reference_frame_rate: 60.0,
            recenter_threshold: 1.0,
        }
    }
}

/// Top-level renderer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    pub window: WindowConfig,
    pub navigation: NavigationConfig,

    /// Framebuffer clear color (RGBA).
    pub clear_color: [f64; 4],

    /// Optional fixed sleep before input polling to bound CPU usage.
    pub frame_throttle: Option<Duration>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            navigation: NavigationConfig::default(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            frame_throttle: None,
        }
    }
}

impl RendererConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }
}
