use crate::config::NavigationConfig;
use crate::coords::DVec2;

/// Current view parameters and the precision-preserving update rules.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    center: DVec2,
    scale: f64,
    anchor: DVec2,
    iteration_cap: i32,
}

impl NavigationState {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            center: DVec2::zero(),
            scale: config.initial_scale,
            anchor: config.initial_anchor.into(),
            iteration_cap: config.iteration_cap,
        }
    }

    /// Builds a state from raw parts. `scale` must be positive and finite.
    pub fn from_parts(center: DVec2, scale: f64, anchor: DVec2, iteration_cap: i32) -> Self {
        debug_assert!(scale > 0.0 && scale.is_finite());
        Self {
            center,
            scale,
            anchor,
            iteration_cap,
        }
    }

    pub fn center(&self) -> DVec2 {
        self.center
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn anchor(&self) -> DVec2 {
        self.anchor
    }

    pub fn iteration_cap(&self) -> i32 {
        self.iteration_cap
    }

    /// Fractal-space point at the screen center.
    pub fn view_center(&self) -> DVec2 {
        self.anchor + self.center * self.scale
    }

    /// Maps a pixel (origin bottom-left) to fractal space.
    ///
    /// One pixel spans `scale / resolution.x` units, so `scale` is the visible
    /// fractal width.
    pub fn pixel_to_fractal(&self, pixel: DVec2, resolution: DVec2) -> DVec2 {
        let half = resolution * 0.5;
        self.view_center() + (pixel - half) * (self.scale / resolution.x)
    }

    /// Folds the fine offset into the anchor: `anchor += center * scale; center = 0`.
    ///
    /// Idempotent: a second call with `center == 0` leaves `anchor` unchanged.
    pub fn recenter(&mut self) {
        if self.center == DVec2::zero() {
            return;
        }
        self.anchor += self.center * self.scale;
        self.center = DVec2::zero();
    }

    /// Multiplies `scale` by `factor` (< 1 zooms in) after recentering.
    ///
    /// Recentering first keeps the view center fixed: the old fine offset is
    /// expressed in the old scale, so it has to be folded before scale changes.
    pub fn zoom(&mut self, factor: f64) {
        if !(factor > 0.0 && factor.is_finite()) {
            log::warn!("ignoring invalid zoom factor {factor}");
            return;
        }
        self.recenter();
        self.scale *= factor;
    }

    /// Moves the fine offset by `delta` (in units of `scale`).
    ///
    /// When `|center|` exceeds `recenter_threshold` the offset is folded into
    /// the anchor, so `center` stays bounded however long the user pans.
    pub fn pan(&mut self, delta: DVec2, recenter_threshold: f64) {
        self.center += delta;
        if self.center.max_abs() > recenter_threshold {
            self.recenter();
        }
    }

    /// Pan step for one reference frame: `max(base / ln(scale + 3), min)`.
    pub fn pan_step(&self, base: f64, min: f64) -> f64 {
        (base / (self.scale + 3.0).ln()).max(min)
    }

    /// `min(cap, round(base + slope * sqrt(ln(10 / scale))))`.
    ///
    /// The logarithm is clamped at zero so zoomed-out views (`scale >= 10`)
    /// get the base count instead of NaN.
    pub fn iteration_count(&self, base: f64, slope: f64) -> i32 {
        let depth = (10.0 / self.scale).ln().max(0.0);
        let n = (base + slope * depth.sqrt()).round();
        if n >= self.iteration_cap as f64 {
            self.iteration_cap
        } else {
            n as i32
        }
    }
}
