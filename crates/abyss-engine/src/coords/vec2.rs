use std::ops::{Add, AddAssign, Mul, Sub};

/// 2D vector in fractal space.
///
/// Double precision: navigation state lives on the host and only the final
/// per-frame values are narrowed for upload.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct DVec2 {
    pub x: f64,
    pub y: f64,
}

impl DVec2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Largest absolute component.
    #[inline]
    pub fn max_abs(self) -> f64 {
        self.x.abs().max(self.y.abs())
    }

    /// Narrows to the `vec2<f32>` uniform representation.
    #[inline]
    pub fn to_f32(self) -> [f32; 2] {
        [self.x as f32, self.y as f32]
    }

    /// Splits into f32 head and tail parts whose sum recovers about 48 bits
    /// of the original value.
    #[inline]
    pub fn split_f32(self) -> ([f32; 2], [f32; 2]) {
        let hi = self.to_f32();
        let lo = [
            (self.x - f64::from(hi[0])) as f32,
            (self.y - f64::from(hi[1])) as f32,
        ];
        (hi, lo)
    }
}

impl From<(f64, f64)> for DVec2 {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl Add for DVec2 {
    type Output = DVec2;
    #[inline]
    fn add(self, rhs: DVec2) -> DVec2 {
        DVec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for DVec2 {
    #[inline]
    fn add_assign(&mut self, rhs: DVec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for DVec2 {
    type Output = DVec2;
    #[inline]
    fn sub(self, rhs: DVec2) -> DVec2 {
        DVec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for DVec2 {
    type Output = DVec2;
    #[inline]
    fn mul(self, rhs: f64) -> DVec2 {
        DVec2::new(self.x * rhs, self.y * rhs)
    }
}
