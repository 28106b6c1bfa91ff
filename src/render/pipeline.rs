use gl::types::GLsizei;

use super::api::GraphicsApi;
use super::mesh::FanMesh;
use super::program::ShaderProgram;

/// Everything one frame needs: the bound program, the fan mesh and the clear color.
///
/// Fields drop in declaration order, so the program is released before the mesh.
pub struct FramePipeline<'gl, G: GraphicsApi> {
    gl: &'gl G,
    program: ShaderProgram<'gl, G>,
    mesh: FanMesh<'gl, G>,
}

impl<'gl, G: GraphicsApi> FramePipeline<'gl, G> {
    pub fn new(
        gl: &'gl G,
        program: ShaderProgram<'gl, G>,
        mesh: FanMesh<'gl, G>,
        clear_color: [f32; 4],
    ) -> Self {
        gl.clear_color(clear_color);
        program.bind();
        mesh.bind();

        Self { gl, program, mesh }
    }

    pub fn program(&self) -> &ShaderProgram<'gl, G> {
        &self.program
    }

    /// Clears the color buffer and draws the fan with one indexed call.
    pub fn draw_frame(&self) {
        self.gl.clear(gl::COLOR_BUFFER_BIT);
        self.gl.draw_elements(gl::TRIANGLE_FAN, self.mesh.index_count());
    }

    /// Sizes past `GLsizei::MAX` saturate.
    pub fn resize(&self, width: u32, height: u32) {
        self.gl.viewport(
            GLsizei::try_from(width).unwrap_or(GLsizei::MAX),
            GLsizei::try_from(height).unwrap_or(GLsizei::MAX),
        );
    }
}
