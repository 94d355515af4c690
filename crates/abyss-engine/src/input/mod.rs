//! Input subsystem.
//!
//! Public API is platform-agnostic; `platform::winit` translates native events.

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};
