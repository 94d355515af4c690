use crate::device::{GpuBackend, ProgramId, ShaderId, ShaderStage, UniformValue};
use crate::error::ShaderError;

/// Vertex stage shared by every variant.
pub const QUAD_VERTEX_SHADER: &str = include_str!("shaders/quad.wgsl");

/// Linked vertex+fragment program.
///
/// `handle()` is `Some` iff a link succeeded. Stage objects never outlive a
/// `compile_and_link` call: they are released after linking and on every
/// failure path. A failed relink leaves the previous program in place.
#[derive(Debug, Default)]
pub struct ShaderProgram {
    program: Option<ProgramId>,
    fragment_source: String,
    generation: u64,
}

impl ShaderProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> Option<ProgramId> {
        self.program
    }

    pub fn is_linked(&self) -> bool {
        self.program.is_some()
    }

    /// Fragment source of the currently linked program.
    pub fn fragment_source(&self) -> &str {
        &self.fragment_source
    }

    /// Number of successful links so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Compiles both stages and links them, replacing the current program on success.
    pub fn compile_and_link<G: GpuBackend + ?Sized>(
        &mut self,
        gpu: &mut G,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ProgramId, ShaderError> {
        let vertex = compile_stage(gpu, ShaderStage::Vertex, vertex_source)?;
        let fragment = match compile_stage(gpu, ShaderStage::Fragment, fragment_source) {
            Ok(id) => id,
            Err(e) => {
                gpu.delete_shader(vertex);
                return Err(e);
            }
        };

        let program = gpu.create_program();
        gpu.attach_shader(program, vertex);
        gpu.attach_shader(program, fragment);
        gpu.link_program(program);
        let status = gpu.program_status(program);

        gpu.delete_shader(vertex);
        gpu.delete_shader(fragment);

        if !status.success {
            gpu.delete_program(program);
            return Err(ShaderError::Link { log: status.log });
        }

        if let Some(previous) = self.program.replace(program) {
            gpu.delete_program(previous);
        }
        self.fragment_source = fragment_source.to_owned();
        self.generation += 1;
        log::debug!(
            "linked program {} (generation {})",
            program.get(),
            self.generation
        );
        Ok(program)
    }

    /// Makes the program current. No-op when nothing is linked.
    pub fn bind<G: GpuBackend + ?Sized>(&self, gpu: &mut G) {
        if let Some(program) = self.program {
            gpu.use_program(program);
        }
    }

    /// Writes a uniform by name. Unknown names are skipped; returns whether a write happened.
    pub fn set_uniform<G: GpuBackend + ?Sized>(
        &self,
        gpu: &mut G,
        name: &str,
        value: UniformValue,
    ) -> bool {
        let Some(program) = self.program else {
            return false;
        };
        match gpu.uniform_location(program, name) {
            Some(location) => {
                gpu.set_uniform(location, value);
                true
            }
            None => {
                log::trace!("uniform `{name}` not present in program {}", program.get());
                false
            }
        }
    }

    pub fn set_float<G: GpuBackend + ?Sized>(&self, gpu: &mut G, name: &str, value: f32) -> bool {
        self.set_uniform(gpu, name, UniformValue::Float(value))
    }

    pub fn set_vec2<G: GpuBackend + ?Sized>(&self, gpu: &mut G, name: &str, value: [f32; 2]) -> bool {
        self.set_uniform(gpu, name, UniformValue::Vec2(value))
    }

    pub fn set_int<G: GpuBackend + ?Sized>(&self, gpu: &mut G, name: &str, value: i32) -> bool {
        self.set_uniform(gpu, name, UniformValue::Int(value))
    }

    /// Deletes the linked program. Idempotent.
    pub fn release<G: GpuBackend + ?Sized>(&mut self, gpu: &mut G) {
        if let Some(program) = self.program.take() {
            gpu.delete_program(program);
            log::debug!("released program {}", program.get());
        }
    }
}

fn compile_stage<G: GpuBackend + ?Sized>(
    gpu: &mut G,
    stage: ShaderStage,
    source: &str,
) -> Result<ShaderId, ShaderError> {
    let shader = gpu.create_shader(stage, source);
    let status = gpu.shader_status(shader);
    if status.success {
        Ok(shader)
    } else {
        gpu.delete_shader(shader);
        Err(ShaderError::Compile {
            stage,
            log: status.log,
        })
    }
}
