use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState};

/// Current keyboard state for the render window.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies an input event to the held-key set and records transitions in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // A release delivered to another window would leave a zoom key stuck.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    #[test]
    fn press_is_reported_once_while_held() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::W, KeyState::Pressed));
        assert!(state.key_down(Key::W));
        assert!(frame.key_pressed(Key::W));

        frame.clear();
        state.apply_event(&mut frame, key(Key::W, KeyState::Pressed));
        assert!(state.key_down(Key::W));
        assert!(!frame.key_pressed(Key::W));
    }

    #[test]
    fn release_clears_held_key() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::S, KeyState::Pressed));
        state.apply_event(&mut frame, key(Key::S, KeyState::Released));
        assert!(!state.key_down(Key::S));
        assert!(frame.keys_released.contains(&Key::S));
        assert_eq!(frame.events.len(), 2);
    }

    #[test]
    fn focus_loss_drops_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::ArrowLeft, KeyState::Pressed));
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(!state.key_down(Key::ArrowLeft));
        assert!(!state.focused);
    }
}
