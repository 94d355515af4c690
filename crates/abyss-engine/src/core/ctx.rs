use crate::device::UniformValue;
use crate::input::{InputFrame, InputState, Key};
use crate::time::FrameTime;

/// Per-frame context passed to the active variant.
pub struct FrameCtx<'a> {
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
    /// Drawable size in physical pixels.
    pub resolution: [f32; 2],
}

impl<'a> FrameCtx<'a> {
    /// Whether `key` is held.
    pub fn key_down(&self, key: Key) -> bool {
        self.input.key_down(key)
    }

    /// Whether `key` went down during this frame's poll.
    pub fn key_pressed(&self, key: Key) -> bool {
        self.input_frame.key_pressed(key)
    }

    /// Movement multiplier: 1.0 when the frame took exactly `1 / reference_rate` seconds.
    pub fn frame_factor(&self, reference_rate: f64) -> f64 {
        self.time.dt * reference_rate
    }
}

/// Named uniform values collected from a variant for one draw.
///
/// Applied by the renderer in insertion order; names the program does not
/// declare are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniformSet {
    values: Vec<(&'static str, UniformValue)>,
}

impl UniformSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn float(&mut self, name: &'static str, value: f32) -> &mut Self {
        self.set(name, UniformValue::Float(value))
    }

    pub fn vec2(&mut self, name: &'static str, value: [f32; 2]) -> &mut Self {
        self.set(name, UniformValue::Vec2(value))
    }

    pub fn int(&mut self, name: &'static str, value: i32) -> &mut Self {
        self.set(name, UniformValue::Int(value))
    }

    /// Sets `name`, replacing an earlier value for the same name.
    pub fn set(&mut self, name: &'static str, value: UniformValue) -> &mut Self {
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.values.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, UniformValue)> + '_ {
        self.values.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
