use crate::config::WindowConfig;
use crate::error::WindowError;
use crate::input::{InputFrame, InputState, Key};

use super::WindowBackend;

/// The render window and its context.
///
/// Owns the backend for the surface's whole life. `close` destroys the window
/// and shuts the backend down exactly once; further calls are no-ops, as is
/// dropping an already-closed surface.
pub struct RenderSurface<W: WindowBackend> {
    backend: W,
    handle: Option<W::Handle>,
    backend_alive: bool,
    config: WindowConfig,
}

impl<W: WindowBackend> RenderSurface<W> {
    /// Initializes the backend, creates the window and makes its context current.
    ///
    /// On any failure after backend bring-up the backend is torn down before
    /// the error propagates; no partial window handle is retained.
    pub fn open(mut backend: W, config: WindowConfig) -> Result<(Self, W::Gpu), WindowError> {
        backend.init()?;

        let handle = match backend.create_window(&config) {
            Ok(h) => h,
            Err(e) => {
                backend.shutdown();
                return Err(e);
            }
        };

        let gpu = match backend.make_current(handle) {
            Ok(gpu) => gpu,
            Err(e) => {
                backend.destroy_window(handle);
                backend.shutdown();
                return Err(e);
            }
        };

        log::info!(
            "opened window \"{}\" ({}x{}, decorated: {})",
            config.title,
            config.width,
            config.height,
            config.decorated
        );

        let surface = Self {
            backend,
            handle: Some(handle),
            backend_alive: true,
            config,
        };
        Ok((surface, gpu))
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// A closed surface always reports that it should close.
    pub fn should_close(&self) -> bool {
        self.handle.is_none_or(|h| self.backend.should_close(h))
    }

    pub fn request_close(&mut self) {
        if let Some(h) = self.handle {
            self.backend.request_close(h);
        }
    }

    pub fn poll_input(&mut self) {
        if self.handle.is_some() {
            self.backend.poll_events();
        }
    }

    /// Held keys and the last poll's transitions; `None` once closed.
    pub fn input(&self) -> Option<(&InputState, &InputFrame)> {
        self.handle.map(|h| self.backend.input(h))
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.input().is_some_and(|(state, _)| state.key_down(key))
    }

    /// Drawable size; falls back to the configured size once closed.
    pub fn framebuffer_size(&self) -> (u32, u32) {
        match self.handle {
            Some(h) => self.backend.framebuffer_size(h),
            None => (self.config.width, self.config.height),
        }
    }

    pub fn present_frame(&mut self) {
        if let Some(h) = self.handle {
            self.backend.swap_buffers(h);
        }
    }

    /// Destroys the window and shuts the backend down. Idempotent.
    pub fn close(&mut self) {
        if let Some(h) = self.handle.take() {
            self.backend.destroy_window(h);
            log::debug!("window destroyed");
        }
        if self.backend_alive {
            self.backend.shutdown();
            self.backend_alive = false;
        }
    }
}

impl<W: WindowBackend> Drop for RenderSurface<W> {
    fn drop(&mut self) {
        self.close();
    }
}
