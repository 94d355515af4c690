//! Coordinate types.

mod vec2;

pub use vec2::DVec2;
