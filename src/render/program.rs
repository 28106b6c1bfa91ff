use gl::types::GLuint;
use std::ffi::CString;

use super::api::GraphicsApi;
use super::shaders::{ShaderSource, StageKind};

/// A successfully compiled shader stage. The stage object is deleted on drop.
pub struct CompiledStage<'gl, G: GraphicsApi> {
    gl: &'gl G,
    id: GLuint,
}

impl<'gl, G: GraphicsApi> CompiledStage<'gl, G> {
    pub fn id(&self) -> GLuint {
        self.id
    }
}

impl<G: GraphicsApi> Drop for CompiledStage<'_, G> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.id);
    }
}

/// Compiles one stage, returning the driver's diagnostic text on failure.
///
/// The stage object is released before the error is returned.
pub fn compile_stage_diagnostic<'gl, G: GraphicsApi>(
    gl: &'gl G,
    kind: StageKind,
    source: &str,
) -> Result<CompiledStage<'gl, G>, String> {
    let source = CString::new(source).map_err(|e| {
        format!(
            "{} shader source contains a NUL byte at offset {}",
            kind,
            e.nul_position()
        )
    })?;

    let stage = CompiledStage {
        gl,
        id: gl.create_shader(kind),
    };
    gl.shader_source(stage.id, &source);
    gl.compile_shader(stage.id);

    if !gl.shader_compile_status(stage.id) {
        let diagnostic = gl.shader_info_log(stage.id);
        if diagnostic.is_empty() {
            return Err("no diagnostic reported by the driver".to_string());
        }
        return Err(diagnostic);
    }

    Ok(stage)
}

/// Compiles one stage, logging the diagnostic and yielding `None` if it fails.
pub fn compile_stage<'gl, G: GraphicsApi>(
    gl: &'gl G,
    kind: StageKind,
    source: &str,
) -> Option<CompiledStage<'gl, G>> {
    match compile_stage_diagnostic(gl, kind, source) {
        Ok(stage) => Some(stage),
        Err(diagnostic) => {
            log::error!("Failed to compile {} shader\n{}", kind, diagnostic);
            None
        }
    }
}

/// A linked shader program. The program object is deleted on drop.
pub struct ShaderProgram<'gl, G: GraphicsApi> {
    gl: &'gl G,
    id: GLuint,
}

impl<'gl, G: GraphicsApi> ShaderProgram<'gl, G> {
    /// Compiles both stages of `source` and links whatever compiled into a new program.
    ///
    /// A stage that fails to compile is logged and attached as the null object 0. Link and
    /// validation failures are logged as warnings; the program is returned either way and may
    /// not draw anything.
    pub fn create(gl: &'gl G, source: ShaderSource) -> Self {
        let program = Self {
            gl,
            id: gl.create_program(),
        };

        let vertex = compile_stage(gl, StageKind::Vertex, &source.vertex);
        let fragment = compile_stage(gl, StageKind::Fragment, &source.fragment);

        for stage in [&vertex, &fragment] {
            gl.attach_shader(program.id, stage.as_ref().map_or(0, CompiledStage::id));
        }
        gl.link_program(program.id);
        gl.validate_program(program.id);

        if !gl.program_link_status(program.id) {
            log::warn!("Shader program failed to link: {}", gl.program_info_log(program.id));
        } else if !gl.program_validate_status(program.id) {
            log::warn!("Shader program failed validation: {}", gl.program_info_log(program.id));
        }

        // Linked programs keep their own copy of the stages.
        drop(vertex);
        drop(fragment);

        program
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn bind(&self) {
        self.gl.use_program(self.id);
    }
}

impl<G: GraphicsApi> Drop for ShaderProgram<'_, G> {
    fn drop(&mut self) {
        self.gl.delete_program(self.id);
    }
}
