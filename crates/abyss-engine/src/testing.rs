//! Recording fakes for the window and GPU backends.
//!
//! `MockWindow` and the `MockGpu` it hands out share one [`Ledger`]: the
//! ordered call log, the set of live GPU objects and the failure switches.
//! Shader compile fails when the source contains `COMPILE_ERROR`; linking
//! fails when an attached source contains `LINK_ERROR`. A uniform exists
//! when some attached source mentions its name.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::rc::Rc;

use crate::config::WindowConfig;
use crate::core::{FractalVariant, FrameCtx, FrameDirective, UniformSet};
use crate::device::{
    BufferId, BufferKind, BuildStatus, GpuBackend, HandleAllocator, ProgramId, ShaderId,
    ShaderStage, UniformLocation, UniformValue, VertexArrayId, VertexLayout,
};
use crate::error::{ShaderError, WindowError};
use crate::input::{InputEvent, InputFrame, InputState, Key, KeyState};
use crate::window::WindowBackend;

/// Fragment source the mock compiles, links and finds every standard uniform in.
pub(crate) const VALID_FRAGMENT: &str = "\
// u_resolution u_center u_scale u_maxIterations iTime
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(0.0, 0.0, 0.0, 1.0);
}
";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Init,
    CreateWindow,
    MakeCurrent,
    PollEvents,
    RequestClose,
    SwapBuffers,
    DestroyWindow,
    Shutdown,

    CreateShader(ShaderStage),
    DeleteShader(ShaderId),
    CreateProgram,
    AttachShader(ProgramId, ShaderId),
    LinkProgram(ProgramId),
    DeleteProgram(ProgramId),
    UseProgram(ProgramId),
    SetUniform(String, UniformValue),
    CreateBuffer(BufferKind),
    DeleteBuffer(BufferId),
    CreateVertexArray,
    DeleteVertexArray(VertexArrayId),
    BindVertexArray(Option<VertexArrayId>),
    Clear,
    DrawIndexed(u32),

    VariantFrameStart,
    VariantFrameEnd,
}

#[derive(Debug, Default)]
pub(crate) struct Ledger {
    pub calls: Vec<Call>,

    pub live_shaders: HashSet<ShaderId>,
    pub live_programs: HashSet<ProgramId>,
    pub live_buffers: HashSet<BufferId>,
    pub live_vertex_arrays: HashSet<VertexArrayId>,
    /// Deletes of handles that were never live or already deleted.
    pub invalid_releases: usize,

    pub backend_live: bool,
    pub window_live: bool,
    pub bound_program: Option<ProgramId>,

    pub fail_init: bool,
    pub fail_create: bool,
    pub fail_make_current: bool,

    /// Keys reported as held from the next poll on.
    pub held_keys: HashSet<Key>,
    /// Window reports a close request once this many polls happened.
    pub close_after_polls: Option<usize>,
    pub polls: usize,
    pub close_requested: bool,

    /// Fragment sources `ScriptedVariant` hands out next, one per reload.
    pub sources: VecDeque<String>,
}

impl Ledger {
    pub fn live_gpu_objects(&self) -> usize {
        self.live_shaders.len()
            + self.live_programs.len()
            + self.live_buffers.len()
            + self.live_vertex_arrays.len()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Recorder(Rc<RefCell<Ledger>>);

impl Recorder {
    pub fn ledger(&self) -> Ref<'_, Ledger> {
        self.0.borrow()
    }

    pub fn ledger_mut(&self) -> RefMut<'_, Ledger> {
        self.0.borrow_mut()
    }

    pub fn clear_calls(&self) {
        self.0.borrow_mut().calls.clear();
    }

    pub fn hold(&self, key: Key) {
        self.0.borrow_mut().held_keys.insert(key);
    }

    pub fn release(&self, key: Key) {
        self.0.borrow_mut().held_keys.remove(&key);
    }

    fn record(&self, call: Call) {
        self.0.borrow_mut().calls.push(call);
    }
}

fn forget<T: std::hash::Hash + Eq>(set: &mut HashSet<T>, id: &T, invalid: &mut usize) {
    if !set.remove(id) {
        *invalid += 1;
    }
}

#[derive(Debug, Default)]
struct MockProgram {
    sources: Vec<String>,
    status: BuildStatus,
}

pub(crate) struct MockGpu {
    rec: Recorder,
    ids: HandleAllocator,
    shaders: HashMap<ShaderId, String>,
    programs: HashMap<ProgramId, MockProgram>,
    uniform_names: RefCell<Vec<String>>,
}

impl MockGpu {
    pub fn new(rec: Recorder) -> Self {
        Self {
            rec,
            ids: HandleAllocator::default(),
            shaders: HashMap::new(),
            programs: HashMap::new(),
            uniform_names: RefCell::default(),
        }
    }
}

impl GpuBackend for MockGpu {
    fn create_shader(&mut self, stage: ShaderStage, source: &str) -> ShaderId {
        let id = ShaderId(self.ids.next());
        self.shaders.insert(id, source.to_owned());
        self.rec.record(Call::CreateShader(stage));
        self.rec.ledger_mut().live_shaders.insert(id);
        id
    }

    fn shader_status(&self, shader: ShaderId) -> BuildStatus {
        match self.shaders.get(&shader) {
            Some(src) if src.contains("COMPILE_ERROR") => {
                BuildStatus::failed("mock: unexpected token `COMPILE_ERROR`")
            }
            Some(_) => BuildStatus::ok(),
            None => BuildStatus::failed("mock: unknown shader"),
        }
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        self.rec.record(Call::DeleteShader(shader));
        let mut ledger = self.rec.ledger_mut();
        let ledger = &mut *ledger;
        forget(&mut ledger.live_shaders, &shader, &mut ledger.invalid_releases);
    }

    fn create_program(&mut self) -> ProgramId {
        let id = ProgramId(self.ids.next());
        self.programs.insert(id, MockProgram::default());
        self.rec.record(Call::CreateProgram);
        self.rec.ledger_mut().live_programs.insert(id);
        id
    }

    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        self.rec.record(Call::AttachShader(program, shader));
        if let (Some(p), Some(src)) = (self.programs.get_mut(&program), self.shaders.get(&shader)) {
            p.sources.push(src.clone());
        }
    }

    fn link_program(&mut self, program: ProgramId) {
        self.rec.record(Call::LinkProgram(program));
        if let Some(p) = self.programs.get_mut(&program) {
            p.status = if p.sources.iter().any(|s| s.contains("LINK_ERROR")) {
                BuildStatus::failed("mock: entry point `fs_main` not found")
            } else if p.sources.len() == 2 {
                BuildStatus::ok()
            } else {
                BuildStatus::failed("mock: program needs two stages")
            };
        }
    }

    fn program_status(&self, program: ProgramId) -> BuildStatus {
        self.programs
            .get(&program)
            .map(|p| p.status.clone())
            .unwrap_or_else(|| BuildStatus::failed("mock: unknown program"))
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.programs.remove(&program);
        self.rec.record(Call::DeleteProgram(program));
        let mut ledger = self.rec.ledger_mut();
        let ledger = &mut *ledger;
        if ledger.bound_program == Some(program) {
            ledger.bound_program = None;
        }
        forget(&mut ledger.live_programs, &program, &mut ledger.invalid_releases);
    }

    fn use_program(&mut self, program: ProgramId) {
        self.rec.record(Call::UseProgram(program));
        self.rec.ledger_mut().bound_program = Some(program);
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        let p = self.programs.get(&program)?;
        if !p.status.success || !p.sources.iter().any(|s| s.contains(name)) {
            return None;
        }
        let mut names = self.uniform_names.borrow_mut();
        let index = match names.iter().position(|n| n == name) {
            Some(i) => i,
            None => {
                names.push(name.to_owned());
                names.len() - 1
            }
        };
        Some(UniformLocation(index as u32))
    }

    fn set_uniform(&mut self, location: UniformLocation, value: UniformValue) {
        let name = self
            .uniform_names
            .borrow()
            .get(location.0 as usize)
            .cloned()
            .unwrap_or_default();
        self.rec.record(Call::SetUniform(name, value));
    }

    fn create_buffer(&mut self, kind: BufferKind, _contents: &[u8]) -> BufferId {
        let id = BufferId(self.ids.next());
        self.rec.record(Call::CreateBuffer(kind));
        self.rec.ledger_mut().live_buffers.insert(id);
        id
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        self.rec.record(Call::DeleteBuffer(buffer));
        let mut ledger = self.rec.ledger_mut();
        let ledger = &mut *ledger;
        forget(&mut ledger.live_buffers, &buffer, &mut ledger.invalid_releases);
    }

    fn create_vertex_array(
        &mut self,
        _vertices: BufferId,
        _indices: BufferId,
        _layout: VertexLayout,
    ) -> VertexArrayId {
        let id = VertexArrayId(self.ids.next());
        self.rec.record(Call::CreateVertexArray);
        self.rec.ledger_mut().live_vertex_arrays.insert(id);
        id
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayId) {
        self.rec.record(Call::DeleteVertexArray(vertex_array));
        let mut ledger = self.rec.ledger_mut();
        let ledger = &mut *ledger;
        forget(
            &mut ledger.live_vertex_arrays,
            &vertex_array,
            &mut ledger.invalid_releases,
        );
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayId>) {
        self.rec.record(Call::BindVertexArray(vertex_array));
    }

    fn clear(&mut self, _color: [f64; 4]) {
        self.rec.record(Call::Clear);
    }

    fn draw_indexed_triangles(&mut self, index_count: u32) {
        self.rec.record(Call::DrawIndexed(index_count));
    }
}

/// Scripted window backend. Clones of the recorder observe and steer it.
pub(crate) struct MockWindow {
    rec: Recorder,
    input: InputState,
    frame: InputFrame,
    size: (u32, u32),
}

impl MockWindow {
    pub fn new(rec: Recorder) -> Self {
        Self {
            rec,
            input: InputState::default(),
            frame: InputFrame::default(),
            size: (0, 0),
        }
    }
}

impl WindowBackend for MockWindow {
    type Handle = u32;
    type Gpu = MockGpu;

    fn init(&mut self) -> Result<(), WindowError> {
        self.rec.record(Call::Init);
        let mut ledger = self.rec.ledger_mut();
        if ledger.fail_init {
            return Err(WindowError::Init("mock: no display".into()));
        }
        ledger.backend_live = true;
        Ok(())
    }

    fn create_window(&mut self, config: &WindowConfig) -> Result<u32, WindowError> {
        self.rec.record(Call::CreateWindow);
        let mut ledger = self.rec.ledger_mut();
        if ledger.fail_create {
            return Err(WindowError::Create("mock: no visual".into()));
        }
        ledger.window_live = true;
        self.size = (config.width, config.height);
        Ok(1)
    }

    fn make_current(&mut self, _handle: u32) -> Result<MockGpu, WindowError> {
        self.rec.record(Call::MakeCurrent);
        if self.rec.ledger().fail_make_current {
            return Err(WindowError::Create("mock: no adapter".into()));
        }
        Ok(MockGpu::new(self.rec.clone()))
    }

    fn poll_events(&mut self) {
        self.rec.record(Call::PollEvents);
        self.frame.clear();

        let (held, close_now) = {
            let mut ledger = self.rec.ledger_mut();
            ledger.polls += 1;
            let close_now = ledger.close_after_polls.is_some_and(|n| ledger.polls >= n);
            (ledger.held_keys.clone(), close_now)
        };

        let released: Vec<Key> = self
            .input
            .keys_down
            .iter()
            .filter(|k| !held.contains(k))
            .copied()
            .collect();
        for key in released {
            let ev = InputEvent::Key {
                key,
                state: KeyState::Released,
                repeat: false,
            };
            self.input.apply_event(&mut self.frame, ev);
        }
        for key in held {
            if !self.input.key_down(key) {
                let ev = InputEvent::Key {
                    key,
                    state: KeyState::Pressed,
                    repeat: false,
                };
                self.input.apply_event(&mut self.frame, ev);
            }
        }

        if close_now {
            self.rec.ledger_mut().close_requested = true;
        }
    }

    fn input(&self, _handle: u32) -> (&InputState, &InputFrame) {
        (&self.input, &self.frame)
    }

    fn should_close(&self, _handle: u32) -> bool {
        self.rec.ledger().close_requested
    }

    fn request_close(&mut self, _handle: u32) {
        self.rec.record(Call::RequestClose);
        self.rec.ledger_mut().close_requested = true;
    }

    fn framebuffer_size(&self, _handle: u32) -> (u32, u32) {
        self.size
    }

    fn swap_buffers(&mut self, _handle: u32) {
        self.rec.record(Call::SwapBuffers);
    }

    fn destroy_window(&mut self, _handle: u32) {
        self.rec.record(Call::DestroyWindow);
        self.rec.ledger_mut().window_live = false;
    }

    fn shutdown(&mut self) {
        self.rec.record(Call::Shutdown);
        self.rec.ledger_mut().backend_live = false;
    }
}

/// Variant that records its callbacks and reloads whenever a source is queued.
///
/// A queued source containing `MISSING` fails to load.
pub(crate) struct ScriptedVariant {
    rec: Recorder,
    current: String,
}

impl ScriptedVariant {
    pub fn new(rec: Recorder, source: &str) -> Self {
        Self {
            rec,
            current: source.to_owned(),
        }
    }
}

impl FractalVariant for ScriptedVariant {
    fn name(&self) -> &str {
        "scripted"
    }

    fn fragment_source(&mut self) -> Result<String, ShaderError> {
        if let Some(next) = self.rec.ledger_mut().sources.pop_front() {
            self.current = next;
        }
        if self.current.contains("MISSING") {
            return Err(ShaderError::MissingSource {
                path: "missing.wgsl".into(),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }
        Ok(self.current.clone())
    }

    fn bind_uniforms(&self, _ctx: &FrameCtx<'_>, uniforms: &mut UniformSet) {
        uniforms
            .float("u_scale", 0.25)
            .int("u_maxIterations", 300)
            .float("u_unused", 1.0);
    }

    fn on_frame_start(&mut self, _ctx: &FrameCtx<'_>) -> FrameDirective {
        self.rec.record(Call::VariantFrameStart);
        if self.rec.ledger().sources.is_empty() {
            FrameDirective::Continue
        } else {
            FrameDirective::ReloadProgram
        }
    }

    fn on_frame_end(&mut self, _ctx: &FrameCtx<'_>) {
        self.rec.record(Call::VariantFrameEnd);
    }
}
