//! GPU command layer.
//!
//! - `GpuBackend`: the handle-based capability the render layer is written against
//! - `WgpuBackend`: the wgpu implementation bound to a winit window
//! - `FrameSlot`: hand-off of the recorded frame to the presenting window backend

mod frame;
mod init;
mod surface;
mod types;
mod wgpu_backend;

pub use frame::{FrameSlot, GpuFrame};
pub use init::GpuInit;
#[cfg(test)]
pub(crate) use types::HandleAllocator;
pub use types::{
    BufferId, BufferKind, BuildStatus, GpuBackend, ProgramId, ShaderId, ShaderStage,
    UniformLocation, UniformValue, VertexArrayId, VertexLayout,
};
pub use wgpu_backend::WgpuBackend;
