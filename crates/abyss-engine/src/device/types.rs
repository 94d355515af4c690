//! GPU command capability used by the render layer.
//!
//! The trait mirrors a classic immediate-mode graphics API: integer-like
//! handles, compile/link status queries, named uniform lookup. The render
//! layer owns every handle it obtains and is responsible for releasing it.

use std::fmt;
use std::num::NonZeroU32;

/// Pipeline stage of a shader object.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

macro_rules! gpu_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
        pub struct $name(pub NonZeroU32);

        impl $name {
            pub fn get(self) -> u32 {
                self.0.get()
            }
        }
    };
}

gpu_handle!(
    /// Compiled single-stage shader object.
    ShaderId
);
gpu_handle!(
    /// Program object; only ever held by callers once linking succeeded.
    ProgramId
);
gpu_handle!(BufferId);
gpu_handle!(
    /// Vertex-array descriptor: vertex buffer + index buffer + attribute layout.
    VertexArrayId
);

/// Location of a named uniform inside a linked program.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UniformLocation(pub u32);

/// Outcome of a compile or link, with the backend's diagnostic text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStatus {
    pub success: bool,
    pub log: String,
}

impl BuildStatus {
    pub fn ok() -> Self {
        Self {
            success: true,
            log: String::new(),
        }
    }

    pub fn failed(log: impl Into<String>) -> Self {
        Self {
            success: false,
            log: log.into(),
        }
    }
}

/// A single uniform upload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Int(i32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferKind {
    Vertex,
    Index,
}

/// Layout of the single float vertex attribute read by the vertex stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexLayout {
    pub location: u32,
    pub components: u32,
    pub stride: u64,
}

impl VertexLayout {
    /// `location = 0`, two floats per vertex, tightly packed.
    pub const POSITION_2D: VertexLayout = VertexLayout {
        location: 0,
        components: 2,
        stride: 2 * std::mem::size_of::<f32>() as u64,
    };
}

/// GPU command backend.
///
/// Obtained from [`crate::window::WindowBackend::make_current`]; a value of
/// this type implies a current context. All calls are synchronous and
/// single-threaded. Release calls must tolerate being the last thing done
/// before teardown and never fail.
pub trait GpuBackend {
    /// Creates and compiles a shader object. Query the outcome with `shader_status`.
    fn create_shader(&mut self, stage: ShaderStage, source: &str) -> ShaderId;
    fn shader_status(&self, shader: ShaderId) -> BuildStatus;
    fn delete_shader(&mut self, shader: ShaderId);

    fn create_program(&mut self) -> ProgramId;
    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId);
    fn link_program(&mut self, program: ProgramId);
    fn program_status(&self, program: ProgramId) -> BuildStatus;
    fn delete_program(&mut self, program: ProgramId);
    fn use_program(&mut self, program: ProgramId);

    /// Looks up a uniform by name. `None` means the program has no such
    /// uniform; writes to it are skipped by callers.
    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation>;
    /// Writes a uniform of the currently used program.
    fn set_uniform(&mut self, location: UniformLocation, value: UniformValue);

    /// Creates an immutable (static-draw) buffer initialized with `contents`.
    fn create_buffer(&mut self, kind: BufferKind, contents: &[u8]) -> BufferId;
    fn delete_buffer(&mut self, buffer: BufferId);
    fn create_vertex_array(
        &mut self,
        vertices: BufferId,
        indices: BufferId,
        layout: VertexLayout,
    ) -> VertexArrayId;
    fn delete_vertex_array(&mut self, vertex_array: VertexArrayId);
    /// Binds a vertex array, or unbinds with `None`.
    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayId>);

    /// Clears the color target of the frame being built.
    fn clear(&mut self, color: [f64; 4]);
    /// Draws `index_count` indices as a triangle list with the bound program and vertex array.
    fn draw_indexed_triangles(&mut self, index_count: u32);
}

/// Hands out non-zero handle values.
#[derive(Debug, Default)]
pub(crate) struct HandleAllocator {
    issued: u32,
}

impl HandleAllocator {
    pub(crate) fn next(&mut self) -> NonZeroU32 {
        let id = NonZeroU32::MIN.saturating_add(self.issued);
        self.issued = self.issued.wrapping_add(1);
        id
    }
}
