use std::sync::Arc;
use std::time::Duration;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::config::WindowConfig;
use crate::device::{FrameSlot, GpuInit, WgpuBackend};
use crate::error::WindowError;
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};

use super::WindowBackend;

/// Pumps needed at most for the platform to deliver the first resume.
const MAX_CREATE_PUMPS: usize = 64;

/// winit implementation of [`WindowBackend`].
///
/// The event loop is pumped from the render loop (`poll_events`) instead of
/// owning the thread, so the renderer keeps its linear frame structure.
/// Supports a single window.
pub struct WinitBackend {
    event_loop: Option<EventLoop<()>>,
    handler: PumpHandler,
    frame_slot: FrameSlot,
    gpu_init: GpuInit,
}

impl WinitBackend {
    pub fn new() -> Self {
        Self::with_gpu_init(GpuInit::default())
    }

    pub fn with_gpu_init(gpu_init: GpuInit) -> Self {
        Self {
            event_loop: None,
            handler: PumpHandler::default(),
            frame_slot: FrameSlot::default(),
            gpu_init,
        }
    }

    fn pump(&mut self) {
        let Some(event_loop) = self.event_loop.as_mut() else { return };
        if let PumpStatus::Exit(code) =
            event_loop.pump_app_events(Some(Duration::ZERO), &mut self.handler)
        {
            log::debug!("event loop exited with code {code}");
            self.handler.close_requested = true;
        }
    }

    fn window(&self, handle: WindowId) -> Option<&Arc<Window>> {
        self.handler.window.as_ref().filter(|w| w.id() == handle)
    }
}

impl Default for WinitBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowBackend for WinitBackend {
    type Handle = WindowId;
    type Gpu = WgpuBackend;

    fn init(&mut self) -> Result<(), WindowError> {
        let event_loop = EventLoop::new().map_err(|e| WindowError::Init(e.to_string()))?;
        self.event_loop = Some(event_loop);
        log::debug!("winit event loop created");
        Ok(())
    }

    fn create_window(&mut self, config: &WindowConfig) -> Result<WindowId, WindowError> {
        if self.event_loop.is_none() {
            return Err(WindowError::Create("backend is not initialized".to_string()));
        }
        if self.handler.window.is_some() {
            return Err(WindowError::Create("a window already exists".to_string()));
        }

        self.handler.pending = Some(config.clone());
        self.handler.create_error = None;

        for _ in 0..MAX_CREATE_PUMPS {
            self.pump();

            if let Some(window) = &self.handler.window {
                return Ok(window.id());
            }
            if let Some(reason) = self.handler.create_error.take() {
                return Err(WindowError::Create(reason));
            }
            if self.handler.close_requested {
                break;
            }
        }

        self.handler.pending = None;
        Err(WindowError::Create(
            "event loop never became ready for window creation".to_string(),
        ))
    }

    fn make_current(&mut self, handle: WindowId) -> Result<WgpuBackend, WindowError> {
        let window = self
            .window(handle)
            .cloned()
            .ok_or_else(|| WindowError::Create(format!("unknown window {handle:?}")))?;

        pollster::block_on(WgpuBackend::new(
            window,
            self.gpu_init.clone(),
            self.frame_slot.clone(),
        ))
        .map_err(|e| WindowError::Create(format!("{e:#}")))
    }

    fn poll_events(&mut self) {
        self.handler.input_frame.clear();
        self.pump();
    }

    fn input(&self, _handle: WindowId) -> (&InputState, &InputFrame) {
        (&self.handler.input_state, &self.handler.input_frame)
    }

    fn should_close(&self, _handle: WindowId) -> bool {
        self.handler.close_requested
    }

    fn request_close(&mut self, _handle: WindowId) {
        self.handler.close_requested = true;
    }

    fn framebuffer_size(&self, handle: WindowId) -> (u32, u32) {
        self.window(handle)
            .map(|w| {
                let size = w.inner_size();
                (size.width, size.height)
            })
            .unwrap_or((0, 0))
    }

    fn swap_buffers(&mut self, handle: WindowId) {
        let Some(frame) = self.frame_slot.take() else { return };
        if let Some(window) = self.window(handle) {
            window.pre_present_notify();
        }
        frame.present();
    }

    fn destroy_window(&mut self, handle: WindowId) {
        if self.window(handle).is_some() {
            self.frame_slot.clear();
            self.handler.window = None;
        }
    }

    fn shutdown(&mut self) {
        self.handler = PumpHandler::default();
        self.event_loop = None;
    }
}

/// Application handler driven by `pump_app_events`.
#[derive(Default)]
struct PumpHandler {
    pending: Option<WindowConfig>,
    window: Option<Arc<Window>>,
    create_error: Option<String>,
    close_requested: bool,
    input_state: InputState,
    input_frame: InputFrame,
}

impl PumpHandler {
    fn create_pending(&mut self, event_loop: &ActiveEventLoop) {
        let Some(config) = self.pending.take() else { return };

        let attrs = Window::default_attributes()
            .with_title(config.title)
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_decorations(config.decorated)
            .with_resizable(false);

        match event_loop.create_window(attrs) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(e) => self.create_error = Some(e.to_string()),
        }
    }
}

impl ApplicationHandler for PumpHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Some platforms deliver the resume only once; later windows are created here.
        self.create_pending(event_loop);
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(ev) = translate_window_event(&event) {
            self.input_state.apply_event(&mut self.input_frame, ev);
        }

        if let WindowEvent::CloseRequested = event {
            self.close_requested = true;
        }
    }
}
