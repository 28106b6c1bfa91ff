use gl::types::{GLsizei, GLuint};
use glam::Vec2;
use std::mem::size_of;

use super::api::{BufferTarget, GraphicsApi};

/// The fan's center followed by its eight rim points, counter-clockwise from +x.
pub const FAN_POSITIONS: [Vec2; 9] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(0.8, 0.8),
    Vec2::new(0.0, 1.0),
    Vec2::new(-0.8, 0.8),
    Vec2::new(-1.0, 0.0),
    Vec2::new(-0.8, -0.8),
    Vec2::new(0.0, -1.0),
    Vec2::new(0.8, -0.8),
];

#[rustfmt::skip]
pub const FAN_INDICES: [u32; 24] = [
    0, 1, 2,
    2, 3, 0,
    3, 4, 0,
    4, 5, 0,
    5, 6, 0,
    6, 7, 0,
    7, 8, 0,
    8, 1, 0,
];

pub const POSITION_ATTRIBUTE: GLuint = 0;

/// The fan's vertex array, vertex buffer and index buffer, resident on the GPU.
pub struct FanMesh<'gl, G: GraphicsApi> {
    gl: &'gl G,
    vao: GLuint,
    vbo: GLuint,
    ibo: GLuint,
    index_count: GLsizei,
}

impl<'gl, G: GraphicsApi> FanMesh<'gl, G> {
    /// Uploads the fixed fan geometry. The vertex array is left bound.
    pub fn upload(gl: &'gl G) -> Self {
        debug_assert!(FAN_INDICES
            .iter()
            .all(|&index| (index as usize) < FAN_POSITIONS.len()));

        let vao = gl.create_vertex_array();
        gl.bind_vertex_array(vao);

        let vbo = gl.create_buffer();
        gl.bind_buffer(BufferTarget::Array, vbo);
        gl.buffer_data(BufferTarget::Array, bytemuck::cast_slice(&FAN_POSITIONS));
        gl.vertex_attrib_pointer_f32(POSITION_ATTRIBUTE, 2, size_of::<Vec2>() as GLsizei, 0);

        let ibo = gl.create_buffer();
        gl.bind_buffer(BufferTarget::ElementArray, ibo);
        gl.buffer_data(BufferTarget::ElementArray, bytemuck::cast_slice(&FAN_INDICES));

        log::debug!(
            "Uploaded fan mesh: {} vertices, {} indices",
            FAN_POSITIONS.len(),
            FAN_INDICES.len()
        );

        Self {
            gl,
            vao,
            vbo,
            ibo,
            index_count: FAN_INDICES.len() as GLsizei,
        }
    }

    pub fn index_count(&self) -> GLsizei {
        self.index_count
    }

    pub fn bind(&self) {
        self.gl.bind_vertex_array(self.vao);
    }
}

impl<G: GraphicsApi> Drop for FanMesh<'_, G> {
    fn drop(&mut self) {
        self.gl.bind_vertex_array(0);
        self.gl.delete_buffer(self.ibo);
        self.gl.delete_buffer(self.vbo);
        self.gl.delete_vertex_array(self.vao);
    }
}
