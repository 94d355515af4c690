use crate::config::RendererConfig;
use crate::core::{FractalVariant, FrameCtx, FrameDirective, UniformSet};
use crate::device::GpuBackend;
use crate::error::{RendererError, ShaderError};
use crate::input::Key;
use crate::time::FrameClock;
use crate::window::{RenderSurface, WindowBackend};

use super::geometry::QuadGeometry;
use super::program::{QUAD_VERTEX_SHADER, ShaderProgram};

/// Lifecycle of a [`FractalRenderer`]. Each setup call advances one step.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RendererState {
    Uninitialized,
    WindowReady,
    ProgramLinked,
    BuffersReady,
    Running,
    Closed,
}

/// Owns the window, the program and the quad, and drives one variant frame by frame.
///
/// Setup is linear: [`initialize_window`](Self::initialize_window),
/// [`create_shader_program`](Self::create_shader_program),
/// [`setup_buffers`](Self::setup_buffers). A failing setup step releases
/// whatever was acquired and leaves the renderer `Closed`. Teardown releases
/// in reverse acquisition order and runs at most once.
pub struct FractalRenderer<W: WindowBackend> {
    config: RendererConfig,
    state: RendererState,
    backend: Option<W>,
    surface: Option<RenderSurface<W>>,
    gpu: Option<W::Gpu>,
    program: ShaderProgram,
    geometry: Option<QuadGeometry>,
    variant: Box<dyn FractalVariant>,
    clock: FrameClock,
}

impl<W: WindowBackend> FractalRenderer<W> {
    pub fn new(backend: W, variant: Box<dyn FractalVariant>, config: RendererConfig) -> Self {
        Self {
            config,
            state: RendererState::Uninitialized,
            backend: Some(backend),
            surface: None,
            gpu: None,
            program: ShaderProgram::new(),
            geometry: None,
            variant,
            clock: FrameClock::new(),
        }
    }

    pub fn state(&self) -> RendererState {
        self.state
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }

    pub fn variant(&self) -> &dyn FractalVariant {
        self.variant.as_ref()
    }

    /// Opens the window and makes its context current.
    pub fn initialize_window(&mut self) -> Result<(), RendererError> {
        self.expect_state(RendererState::Uninitialized)?;
        let Some(backend) = self.backend.take() else {
            return Err(self.invalid(RendererState::Uninitialized));
        };

        match RenderSurface::open(backend, self.config.window.clone()) {
            Ok((surface, gpu)) => {
                self.surface = Some(surface);
                self.gpu = Some(gpu);
                self.transition(RendererState::WindowReady);
                Ok(())
            }
            Err(e) => {
                self.transition(RendererState::Closed);
                Err(e.into())
            }
        }
    }

    /// Compiles the quad vertex stage with the variant's fragment source.
    pub fn create_shader_program(&mut self) -> Result<(), RendererError> {
        self.expect_state(RendererState::WindowReady)?;
        let result = match self.gpu.as_mut() {
            Some(gpu) => link_variant(&mut self.program, gpu, self.variant.as_mut()),
            None => return Err(self.invalid(RendererState::WindowReady)),
        };

        match result {
            Ok(()) => {
                log::info!("{} program ready", self.variant.name());
                self.transition(RendererState::ProgramLinked);
                Ok(())
            }
            Err(e) => {
                self.close();
                Err(e.into())
            }
        }
    }

    /// Allocates the full-screen quad.
    pub fn setup_buffers(&mut self) -> Result<(), RendererError> {
        self.expect_state(RendererState::ProgramLinked)?;
        let Some(gpu) = self.gpu.as_mut() else {
            return Err(self.invalid(RendererState::ProgramLinked));
        };
        self.geometry = Some(QuadGeometry::allocate(gpu));
        self.clock.reset();
        self.transition(RendererState::BuffersReady);
        Ok(())
    }

    /// Renders one frame. Returns `Ok(false)` once the window asked to close.
    ///
    /// A failed shader reload is logged and the previous program keeps drawing.
    pub fn render_frame(&mut self) -> Result<bool, RendererError> {
        if !matches!(
            self.state,
            RendererState::BuffersReady | RendererState::Running
        ) {
            return Err(self.invalid(RendererState::Running));
        }

        if let Some(pause) = self.config.frame_throttle {
            std::thread::sleep(pause);
        }

        let actual = self.state;
        let (Some(surface), Some(gpu), Some(geometry)) = (
            self.surface.as_mut(),
            self.gpu.as_mut(),
            self.geometry.as_ref(),
        ) else {
            return Err(RendererError::InvalidState {
                expected: RendererState::Running,
                actual,
            });
        };

        if surface.should_close() {
            return Ok(false);
        }

        surface.poll_input();
        if surface.is_key_down(Key::Escape) {
            surface.request_close();
        }

        let time = self.clock.tick();
        let (width, height) = surface.framebuffer_size();
        let resolution = [width as f32, height as f32];

        let directive = {
            let Some((input, input_frame)) = surface.input() else {
                return Ok(false);
            };
            let ctx = FrameCtx {
                input,
                input_frame,
                time,
                resolution,
            };
            self.variant.on_frame_start(&ctx)
        };

        if directive == FrameDirective::ReloadProgram {
            match link_variant(&mut self.program, gpu, self.variant.as_mut()) {
                Ok(()) => log::info!(
                    "reloaded {} program (generation {})",
                    self.variant.name(),
                    self.program.generation()
                ),
                Err(e) => log::warn!("shader reload failed, keeping previous program: {e}"),
            }
        }

        gpu.clear(self.config.clear_color);
        self.program.bind(gpu);

        let mut uniforms = UniformSet::new();
        if let Some((input, input_frame)) = surface.input() {
            let ctx = FrameCtx {
                input,
                input_frame,
                time,
                resolution,
            };
            self.variant.bind_uniforms(&ctx, &mut uniforms);
        }
        for (name, value) in uniforms.iter() {
            self.program.set_uniform(gpu, name, value);
        }

        geometry.bind(gpu);
        geometry.draw(gpu);
        surface.present_frame();

        if let Some((input, input_frame)) = surface.input() {
            let ctx = FrameCtx {
                input,
                input_frame,
                time,
                resolution,
            };
            self.variant.on_frame_end(&ctx);
        }

        if self.state != RendererState::Running {
            self.transition(RendererState::Running);
        }
        Ok(true)
    }

    /// Renders frames until the window closes.
    pub fn render_loop(&mut self) -> Result<(), RendererError> {
        while self.render_frame()? {}
        log::info!(
            "render loop finished after {} frames",
            self.clock.frame_index()
        );
        Ok(())
    }

    /// Full lifecycle: setup, loop, teardown.
    pub fn run(&mut self) -> Result<(), RendererError> {
        self.initialize_window()?;
        self.create_shader_program()?;
        self.setup_buffers()?;
        let result = self.render_loop();
        self.close();
        result
    }

    /// Releases geometry, program, context and window, in that order. Idempotent.
    pub fn close(&mut self) {
        if self.state == RendererState::Closed {
            return;
        }

        if let Some(gpu) = self.gpu.as_mut() {
            if let Some(mut geometry) = self.geometry.take() {
                geometry.release(gpu);
            }
            self.program.release(gpu);
        }
        self.gpu = None;

        if let Some(mut surface) = self.surface.take() {
            surface.close();
        }
        self.backend = None;
        self.transition(RendererState::Closed);
    }

    fn expect_state(&self, expected: RendererState) -> Result<(), RendererError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.invalid(expected))
        }
    }

    fn invalid(&self, expected: RendererState) -> RendererError {
        RendererError::InvalidState {
            expected,
            actual: self.state,
        }
    }

    fn transition(&mut self, next: RendererState) {
        log::debug!("renderer {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

impl<W: WindowBackend> Drop for FractalRenderer<W> {
    fn drop(&mut self) {
        self.close();
    }
}

fn link_variant<G: GpuBackend + ?Sized>(
    program: &mut ShaderProgram,
    gpu: &mut G,
    variant: &mut dyn FractalVariant,
) -> Result<(), ShaderError> {
    let source = variant.fragment_source()?;
    program.compile_and_link(gpu, QUAD_VERTEX_SHADER, &source)?;
    Ok(())
}
