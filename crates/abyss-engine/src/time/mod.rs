//! Time subsystem.
//!
//! One `FrameClock` per render loop; `tick()` once per frame yields the delta
//! time used by navigation and the elapsed time fed to animated shaders.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
