//! Deep-zoom navigation.
//!
//! View parameters live on the host in `f64`. The fractal-space point under
//! the screen center is `anchor + center * scale`: `anchor` carries the
//! large accumulated translation while `center` is a fine offset, measured in
//! units of the current `scale`, that `recenter` keeps near the origin.

mod state;

pub use state::NavigationState;
