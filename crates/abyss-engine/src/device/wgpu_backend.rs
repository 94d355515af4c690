use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use winit::window::Window;

use super::surface::{self, SurfaceErrorAction};
use super::types::{
    BufferId, BufferKind, BuildStatus, GpuBackend, HandleAllocator, ProgramId, ShaderId,
    ShaderStage, UniformLocation, UniformValue, VertexArrayId, VertexLayout,
};
use super::{FrameSlot, GpuFrame, GpuInit};

/// Uniform block shared by every program, bound at `@group(0) @binding(0)`.
///
/// `center` and `center_low` are the high and low f32 halves of the f64 view
/// center; shaders that need deep-zoom precision add them in double-single
/// arithmetic.
///
/// WGSL side:
///
/// ```wgsl
/// struct Uniforms {
///     resolution: vec2<f32>,
///     center: vec2<f32>,
///     center_low: vec2<f32>,
///     scale: f32,
///     time: f32,
///     max_iterations: i32,
///     _pad0: f32,
///     _pad1: f32,
///     _pad2: f32,
/// };
/// ```
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Pod, Zeroable)]
struct FrameUniforms {
    resolution: [f32; 2],
    center: [f32; 2],
    center_low: [f32; 2],
    scale: f32,
    time: f32,
    max_iterations: i32,
    _pad: [f32; 3],
}

/// Named fields of [`FrameUniforms`]; the discriminant is the uniform location.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum UniformSlot {
    Resolution = 0,
    Center = 1,
    CenterLow = 2,
    Scale = 3,
    Time = 4,
    MaxIterations = 5,
}

impl UniformSlot {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "u_resolution" | "iResolution" => Some(Self::Resolution),
            "u_center" => Some(Self::Center),
            "u_centerLow" => Some(Self::CenterLow),
            "u_scale" => Some(Self::Scale),
            "u_time" | "iTime" => Some(Self::Time),
            "u_maxIterations" => Some(Self::MaxIterations),
            _ => None,
        }
    }

    fn from_location(location: UniformLocation) -> Option<Self> {
        match location.0 {
            0 => Some(Self::Resolution),
            1 => Some(Self::Center),
            2 => Some(Self::CenterLow),
            3 => Some(Self::Scale),
            4 => Some(Self::Time),
            5 => Some(Self::MaxIterations),
            _ => None,
        }
    }
}

struct CompiledStage {
    stage: ShaderStage,
    module: Option<wgpu::ShaderModule>,
    log: String,
}

#[derive(Default)]
struct ProgramEntry {
    stages: Vec<(ShaderStage, wgpu::ShaderModule)>,
    pipeline: Option<wgpu::RenderPipeline>,
    log: String,
}

struct VertexArray {
    vertices: BufferId,
    indices: BufferId,
    layout: VertexLayout,
}

/// wgpu implementation of [`GpuBackend`].
///
/// Shader stages are WGSL modules (`vs_main` / `fs_main` entry points); a
/// "linked program" is a render pipeline over the shared uniform layout.
/// Compile and link failures are captured with validation error scopes and
/// surfaced as status logs, never as panics.
pub struct WgpuBackend {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    frame_slot: FrameSlot,

    handles: HandleAllocator,
    shaders: HashMap<ShaderId, CompiledStage>,
    programs: HashMap<ProgramId, ProgramEntry>,
    buffers: HashMap<BufferId, wgpu::Buffer>,
    vertex_arrays: HashMap<VertexArrayId, VertexArray>,

    pipeline_layout: wgpu::PipelineLayout,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    uniforms: FrameUniforms,

    current_program: Option<ProgramId>,
    current_vertex_array: Option<VertexArrayId>,
}

impl WgpuBackend {
    /// Creates a device bound to `window`. Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(window: Arc<Window>, init: GpuInit, frame_slot: FrameSlot) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let GpuInit {
            prefer_srgb,
            present_mode,
            alpha_mode,
            required_features,
            required_limits,
            desired_maximum_frame_latency,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let info = adapter.get_info();
        log::info!("GPU adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("abyss device"),
                required_features,
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&surface_caps, prefer_srgb)
            .context("no supported surface formats")?;
        let alpha_mode = surface::choose_alpha_mode(&surface_caps, alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);

        let (uniform_layout, pipeline_layout) = create_layouts(&device);

        let uniforms = FrameUniforms::default();
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("abyss uniforms ubo"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("abyss uniforms bind group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            frame_slot,
            handles: HandleAllocator::default(),
            shaders: HashMap::new(),
            programs: HashMap::new(),
            buffers: HashMap::new(),
            vertex_arrays: HashMap::new(),
            pipeline_layout,
            uniform_buffer,
            uniform_bind_group,
            uniforms,
            current_program: None,
            current_vertex_array: None,
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Reconfigures the surface when the window's physical size changed.
    fn sync_surface_size(&mut self) {
        let size = self.window.inner_size();
        if size.width == 0 || size.height == 0 {
            return;
        }
        if (size.width, size.height) != (self.config.width, self.config.height) {
            self.config.width = size.width;
            self.config.height = size.height;
            self.surface.configure(&self.device, &self.config);
            log::debug!("surface resized to {}x{}", size.width, size.height);
        }
    }
}

impl GpuBackend for WgpuBackend {
    fn create_shader(&mut self, stage: ShaderStage, source: &str) -> ShaderId {
        let id = ShaderId(self.handles.next());
        let label = format!("abyss {stage} shader #{}", id.get());

        let entry = compile_stage(&self.device, stage, &label, source);

        self.shaders.insert(id, entry);
        id
    }

    fn shader_status(&self, shader: ShaderId) -> BuildStatus {
        match self.shaders.get(&shader) {
            Some(entry) if entry.module.is_some() => BuildStatus::ok(),
            Some(entry) => BuildStatus::failed(entry.log.clone()),
            None => BuildStatus::failed(format!("unknown shader object {}", shader.get())),
        }
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        self.shaders.remove(&shader);
    }

    fn create_program(&mut self) -> ProgramId {
        let id = ProgramId(self.handles.next());
        self.programs.insert(id, ProgramEntry::default());
        id
    }

    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        let Some(stage) = self.shaders.get(&shader) else { return };
        let Some(entry) = self.programs.get_mut(&program) else { return };

        match &stage.module {
            Some(module) => entry.stages.push((stage.stage, module.clone())),
            None => entry
                .log
                .push_str(&format!("attached {} stage failed to compile\n", stage.stage)),
        }
    }

    fn link_program(&mut self, program: ProgramId) {
        let Some(entry) = self.programs.get(&program) else { return };

        let module = |wanted: ShaderStage| {
            entry
                .stages
                .iter()
                .find(|(stage, _)| *stage == wanted)
                .map(|(_, m)| m.clone())
        };

        let outcome = match (module(ShaderStage::Vertex), module(ShaderStage::Fragment)) {
            (Some(vs), Some(fs)) => match build_pipeline(
                &self.device,
                &self.pipeline_layout,
                self.config.format,
                &vs,
                &fs,
            ) {
                (pipeline, None) => Ok(pipeline),
                (_, Some(log)) => Err(log),
            },
            _ => Err("program requires a compiled vertex and fragment stage".to_string()),
        };

        let Some(entry) = self.programs.get_mut(&program) else { return };
        match outcome {
            Ok(pipeline) => {
                entry.pipeline = Some(pipeline);
                entry.log.clear();
            }
            Err(log) => {
                entry.pipeline = None;
                entry.log.push_str(&log);
            }
        }
    }

    fn program_status(&self, program: ProgramId) -> BuildStatus {
        match self.programs.get(&program) {
            Some(entry) if entry.pipeline.is_some() => BuildStatus::ok(),
            Some(entry) => BuildStatus::failed(entry.log.clone()),
            None => BuildStatus::failed(format!("unknown program object {}", program.get())),
        }
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.programs.remove(&program);
        if self.current_program == Some(program) {
            self.current_program = None;
        }
    }

    fn use_program(&mut self, program: ProgramId) {
        self.current_program = Some(program);
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        let linked = self
            .programs
            .get(&program)
            .is_some_and(|entry| entry.pipeline.is_some());
        if !linked {
            return None;
        }
        UniformSlot::from_name(name).map(|slot| UniformLocation(slot as u32))
    }

    fn set_uniform(&mut self, location: UniformLocation, value: UniformValue) {
        let u = &mut self.uniforms;
        match (UniformSlot::from_location(location), value) {
            (Some(UniformSlot::Resolution), UniformValue::Vec2(v)) => u.resolution = v,
            (Some(UniformSlot::Center), UniformValue::Vec2(v)) => u.center = v,
            (Some(UniformSlot::CenterLow), UniformValue::Vec2(v)) => u.center_low = v,
            (Some(UniformSlot::Scale), UniformValue::Float(v)) => u.scale = v,
            (Some(UniformSlot::Time), UniformValue::Float(v)) => u.time = v,
            (Some(UniformSlot::MaxIterations), UniformValue::Int(v)) => u.max_iterations = v,
            (slot, value) => {
                log::trace!("uniform type mismatch ignored: {slot:?} <- {value:?}");
            }
        }
    }

    fn create_buffer(&mut self, kind: BufferKind, contents: &[u8]) -> BufferId {
        let id = BufferId(self.handles.next());
        let (label, usage) = match kind {
            BufferKind::Vertex => ("abyss quad vbo", wgpu::BufferUsages::VERTEX),
            BufferKind::Index => ("abyss quad ibo", wgpu::BufferUsages::INDEX),
        };

        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage,
            });

        self.buffers.insert(id, buffer);
        id
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        if let Some(buffer) = self.buffers.remove(&buffer) {
            buffer.destroy();
        }
    }

    fn create_vertex_array(
        &mut self,
        vertices: BufferId,
        indices: BufferId,
        layout: VertexLayout,
    ) -> VertexArrayId {
        if layout != VertexLayout::POSITION_2D {
            log::warn!("pipelines are built for a 2D position layout, got {layout:?}");
        }

        let id = VertexArrayId(self.handles.next());
        self.vertex_arrays.insert(
            id,
            VertexArray {
                vertices,
                indices,
                layout,
            },
        );
        id
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayId) {
        self.vertex_arrays.remove(&vertex_array);
        if self.current_vertex_array == Some(vertex_array) {
            self.current_vertex_array = None;
        }
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayId>) {
        self.current_vertex_array = vertex_array;
    }

    fn clear(&mut self, color: [f64; 4]) {
        self.sync_surface_size();
        let surface_texture = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(err) => {
                self.frame_slot.clear();
                match surface::map_surface_error(&self.surface, &self.device, &self.config, err) {
                    SurfaceErrorAction::Fatal => log::error!("surface unusable; skipping frame"),
                    action => log::debug!("frame acquisition failed: {action:?}"),
                }
                return;
            }
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("abyss frame encoder"),
            });

        {
            let [r, g, b, a] = color;
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("abyss clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        self.frame_slot.put(GpuFrame {
            surface_texture,
            view,
            encoder,
            queue: self.queue.clone(),
        });
    }

    fn draw_indexed_triangles(&mut self, index_count: u32) {
        let Some(pipeline) = self
            .current_program
            .and_then(|id| self.programs.get(&id))
            .and_then(|entry| entry.pipeline.as_ref())
        else {
            log::trace!("draw skipped: no linked program bound");
            return;
        };

        let Some(vao) = self
            .current_vertex_array
            .and_then(|id| self.vertex_arrays.get(&id))
        else {
            log::trace!("draw skipped: no vertex array bound");
            return;
        };

        let (Some(vbo), Some(ibo)) = (self.buffers.get(&vao.vertices), self.buffers.get(&vao.indices))
        else {
            log::trace!("draw skipped: vertex array references released buffers");
            return;
        };

        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));

        let bind_group = &self.uniform_bind_group;

        let recorded = self.frame_slot.with_frame(|frame| {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("abyss fractal pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, bind_group, &[]);
            rpass.set_vertex_buffer(0, vbo.slice(..));
            rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..index_count, 0, 0..1);
        });

        if !recorded {
            log::trace!("draw skipped: no frame acquired");
        }
    }
}

/// Runs `f` inside a validation error scope and returns the captured error text.
fn capture_validation<T>(
    device: &wgpu::Device,
    f: impl FnOnce(&wgpu::Device) -> T,
) -> (T, Option<String>) {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = f(device);
    let error = pollster::block_on(scope.pop());
    (value, error.map(|e| e.to_string()))
}

/// Bind group layout for [`FrameUniforms`] and the pipeline layout every program shares.
fn create_layouts(device: &wgpu::Device) -> (wgpu::BindGroupLayout, wgpu::PipelineLayout) {
    let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("abyss uniforms layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(
                    std::mem::size_of::<FrameUniforms>() as u64
                ),
            },
            count: None,
        }],
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("abyss pipeline layout"),
        bind_group_layouts: &[&uniform_layout],
        immediate_size: 0,
    });

    (uniform_layout, pipeline_layout)
}

/// Compiles one WGSL stage; a rejected module keeps its validation log instead.
fn compile_stage(
    device: &wgpu::Device,
    stage: ShaderStage,
    label: &str,
    source: &str,
) -> CompiledStage {
    let (module, error) = capture_validation(device, |device| {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        })
    });

    match error {
        None => CompiledStage {
            stage,
            module: Some(module),
            log: String::new(),
        },
        Some(log) => CompiledStage {
            stage,
            module: None,
            log,
        },
    }
}

/// Builds the fractal pipeline from a vertex and fragment module.
///
/// The pipeline handle is always returned; it is only usable when the log is `None`.
fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    vertex: &wgpu::ShaderModule,
    fragment: &wgpu::ShaderModule,
) -> (wgpu::RenderPipeline, Option<String>) {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    capture_validation(device, |device| {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("abyss fractal pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: vertex,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: VertexLayout::POSITION_2D.stride,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &ATTRS,
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: fragment,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fractal::MANDELBROT_SHADER;
    use crate::render::QUAD_VERTEX_SHADER;

    const HOTLOAD_SAMPLE: &str = include_str!("../../../abyss-studio/shaders/hotload.wgsl");
    const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// Surface-less device; `None` on machines without any adapter.
    fn headless_device() -> Option<wgpu::Device> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok()?;
        let (device, _queue) =
            pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default())).ok()?;
        Some(device)
    }

    macro_rules! device_or_skip {
        () => {
            match headless_device() {
                Some(device) => device,
                None => {
                    eprintln!("no GPU adapter available; skipping");
                    return;
                }
            }
        };
    }

    fn link(device: &wgpu::Device, vertex: &str, fragment: &str) -> Option<String> {
        let (_, layout) = create_layouts(device);
        let vs = compile_stage(device, ShaderStage::Vertex, "test vs", vertex);
        let fs = compile_stage(device, ShaderStage::Fragment, "test fs", fragment);
        let vs = vs.module.unwrap_or_else(|| panic!("vertex stage: {}", vs.log));
        let fs = fs.module.unwrap_or_else(|| panic!("fragment stage: {}", fs.log));
        build_pipeline(device, &layout, TARGET_FORMAT, &vs, &fs).1
    }

    #[test]
    fn uniform_block_matches_wgsl_layout() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 48);
        assert_eq!(std::mem::offset_of!(FrameUniforms, center_low), 16);
        assert_eq!(std::mem::offset_of!(FrameUniforms, scale), 24);
        assert_eq!(std::mem::offset_of!(FrameUniforms, max_iterations), 32);
    }

    #[test]
    fn uniform_names_map_to_stable_locations() {
        for name in [
            "u_resolution",
            "u_center",
            "u_centerLow",
            "u_scale",
            "u_time",
            "u_maxIterations",
        ] {
            let slot = UniformSlot::from_name(name).expect("known uniform");
            assert_eq!(UniformSlot::from_location(UniformLocation(slot as u32)), Some(slot));
        }
        assert_eq!(UniformSlot::from_name("iTime"), Some(UniformSlot::Time));
        assert_eq!(UniformSlot::from_name("u_zoom"), None);
        assert_eq!(UniformSlot::from_location(UniformLocation(6)), None);
    }

    #[test]
    fn invalid_wgsl_is_reported_not_panicked() {
        let device = device_or_skip!();

        let stage = compile_stage(
            &device,
            ShaderStage::Fragment,
            "broken fs",
            "COMPILE ERROR @fragment fn fs_main(",
        );

        assert!(stage.module.is_none());
        assert!(!stage.log.is_empty());
    }

    #[test]
    fn missing_entry_point_fails_to_link() {
        let device = device_or_skip!();
        let (_, layout) = create_layouts(&device);

        let vs = compile_stage(&device, ShaderStage::Vertex, "quad vs", QUAD_VERTEX_SHADER);
        let fs = compile_stage(
            &device,
            ShaderStage::Fragment,
            "no fs_main",
            "@fragment\nfn main() -> @location(0) vec4<f32> {\n    return vec4<f32>(1.0);\n}\n",
        );
        let (Some(vs), Some(fs)) = (vs.module, fs.module) else {
            panic!("both stages should compile");
        };

        let (_, log) = build_pipeline(&device, &layout, TARGET_FORMAT, &vs, &fs);
        assert!(log.is_some_and(|log| !log.is_empty()));
    }

    #[test]
    fn mandelbrot_shader_links_against_the_quad() {
        let device = device_or_skip!();
        assert_eq!(link(&device, QUAD_VERTEX_SHADER, MANDELBROT_SHADER), None);
    }

    #[test]
    fn hotload_sample_links_against_the_quad() {
        let device = device_or_skip!();
        assert_eq!(link(&device, QUAD_VERTEX_SHADER, HOTLOAD_SAMPLE), None);
    }

    #[test]
    fn errors_do_not_leak_into_the_next_scope() {
        let device = device_or_skip!();

        let broken = compile_stage(&device, ShaderStage::Fragment, "broken", "fn (");
        assert!(broken.module.is_none());

        let fine = compile_stage(&device, ShaderStage::Vertex, "quad", QUAD_VERTEX_SHADER);
        assert!(fine.module.is_some(), "{}", fine.log);
    }
}
