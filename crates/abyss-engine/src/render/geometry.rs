use bytemuck::{Pod, Zeroable};

use crate::device::{BufferId, BufferKind, GpuBackend, VertexArrayId, VertexLayout};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub pos: [f32; 2], // clip space
}

pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [-1.0, -1.0] },
    QuadVertex { pos: [1.0, -1.0] },
    QuadVertex { pos: [-1.0, 1.0] },
    QuadVertex { pos: [1.0, 1.0] },
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 1, 3];

/// The full-screen quad's GPU allocations: vertex buffer, index buffer and
/// the vertex array tying them to the position attribute.
///
/// Contents are static; `release` frees everything and may be called any
/// number of times.
#[derive(Debug, Default)]
pub struct QuadGeometry {
    vertex_array: Option<VertexArrayId>,
    vertex_buffer: Option<BufferId>,
    index_buffer: Option<BufferId>,
}

impl QuadGeometry {
    pub fn allocate<G: GpuBackend + ?Sized>(gpu: &mut G) -> Self {
        let vertex_buffer =
            gpu.create_buffer(BufferKind::Vertex, bytemuck::cast_slice(&QUAD_VERTICES));
        let index_buffer =
            gpu.create_buffer(BufferKind::Index, bytemuck::cast_slice(&QUAD_INDICES));
        let vertex_array =
            gpu.create_vertex_array(vertex_buffer, index_buffer, VertexLayout::POSITION_2D);
        log::debug!(
            "allocated quad geometry (vao {}, vbo {}, ibo {})",
            vertex_array.get(),
            vertex_buffer.get(),
            index_buffer.get()
        );

        Self {
            vertex_array: Some(vertex_array),
            vertex_buffer: Some(vertex_buffer),
            index_buffer: Some(index_buffer),
        }
    }

    pub fn is_allocated(&self) -> bool {
        self.vertex_array.is_some()
    }

    pub fn index_count(&self) -> u32 {
        QUAD_INDICES.len() as u32
    }

    pub fn bind<G: GpuBackend + ?Sized>(&self, gpu: &mut G) {
        if let Some(vao) = self.vertex_array {
            gpu.bind_vertex_array(Some(vao));
        }
    }

    pub fn draw<G: GpuBackend + ?Sized>(&self, gpu: &mut G) {
        if self.is_allocated() {
            gpu.draw_indexed_triangles(self.index_count());
        }
    }

    pub fn release<G: GpuBackend + ?Sized>(&mut self, gpu: &mut G) {
        if let Some(vao) = self.vertex_array.take() {
            gpu.bind_vertex_array(None);
            gpu.delete_vertex_array(vao);
        }
        if let Some(vbo) = self.vertex_buffer.take() {
            gpu.delete_buffer(vbo);
        }
        if let Some(ibo) = self.index_buffer.take() {
            gpu.delete_buffer(ibo);
        }
    }
}
