//! Recording stand-in for a GL context, used by unit tests.
//!
//! A stage "compiles" when it defines `void main` and its braces balance. A program links when
//! it has one compiled vertex and one compiled fragment stage attached.

use gl::types::*;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ffi::CStr;

use super::api::{BufferTarget, GraphicsApi};
use super::shaders::StageKind;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(StageKind, GLuint),
    CompileShader(GLuint),
    DeleteShader(GLuint),
    CreateProgram(GLuint),
    AttachShader(GLuint, GLuint),
    LinkProgram(GLuint),
    ValidateProgram(GLuint),
    UseProgram(GLuint),
    DeleteProgram(GLuint),
    CreateVertexArray(GLuint),
    BindVertexArray(GLuint),
    DeleteVertexArray(GLuint),
    CreateBuffer(GLuint),
    BindBuffer(BufferTarget, GLuint),
    BufferData(BufferTarget, Vec<u8>),
    DeleteBuffer(GLuint),
    VertexAttribPointer {
        index: GLuint,
        size: GLint,
        stride: GLsizei,
        offset: usize,
    },
    ClearColor([f32; 4]),
    Clear(GLbitfield),
    DrawElements(GLenum, GLsizei),
    Viewport(GLsizei, GLsizei),
}

#[derive(Default)]
pub struct FakeGl {
    next_id: Cell<GLuint>,
    kinds: RefCell<HashMap<GLuint, StageKind>>,
    sources: RefCell<HashMap<GLuint, String>>,
    compiled: RefCell<HashMap<GLuint, bool>>,
    attached: RefCell<HashMap<GLuint, Vec<GLuint>>>,
    linked: RefCell<HashMap<GLuint, bool>>,
    calls: RefCell<Vec<Call>>,
}

impl FakeGl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| matches(call)).count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn next(&self) -> GLuint {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn source_compiles(source: &str) -> bool {
        source.contains("void main") && source.matches('{').count() == source.matches('}').count()
    }
}

impl GraphicsApi for FakeGl {
    fn create_shader(&self, kind: StageKind) -> GLuint {
        let id = self.next();
        self.kinds.borrow_mut().insert(id, kind);
        self.record(Call::CreateShader(kind, id));
        id
    }

    fn shader_source(&self, shader: GLuint, source: &CStr) {
        self.sources
            .borrow_mut()
            .insert(shader, source.to_string_lossy().into_owned());
    }

    fn compile_shader(&self, shader: GLuint) {
        let ok = self
            .sources
            .borrow()
            .get(&shader)
            .map_or(false, |source| Self::source_compiles(source));
        self.compiled.borrow_mut().insert(shader, ok);
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: GLuint) -> bool {
        self.compiled.borrow().get(&shader).copied().unwrap_or(false)
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        if self.shader_compile_status(shader) {
            String::new()
        } else {
            "0:1(1): error: syntax error, unexpected end of file".to_string()
        }
    }

    fn delete_shader(&self, shader: GLuint) {
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> GLuint {
        let id = self.next();
        self.record(Call::CreateProgram(id));
        id
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        self.attached.borrow_mut().entry(program).or_default().push(shader);
        self.record(Call::AttachShader(program, shader));
    }

    fn link_program(&self, program: GLuint) {
        let attached = self.attached.borrow().get(&program).cloned().unwrap_or_default();
        let kinds = self.kinds.borrow();
        let has = |kind: StageKind| {
            attached
                .iter()
                .any(|shader| kinds.get(shader) == Some(&kind) && self.shader_compile_status(*shader))
        };
        let ok = has(StageKind::Vertex) && has(StageKind::Fragment);
        self.linked.borrow_mut().insert(program, ok);
        self.record(Call::LinkProgram(program));
    }

    fn validate_program(&self, program: GLuint) {
        self.record(Call::ValidateProgram(program));
    }

    fn program_link_status(&self, program: GLuint) -> bool {
        self.linked.borrow().get(&program).copied().unwrap_or(false)
    }

    fn program_validate_status(&self, program: GLuint) -> bool {
        self.program_link_status(program)
    }

    fn program_info_log(&self, program: GLuint) -> String {
        if self.program_link_status(program) {
            String::new()
        } else {
            "error: program lacks a compiled vertex or fragment stage".to_string()
        }
    }

    fn use_program(&self, program: GLuint) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: GLuint) {
        self.record(Call::DeleteProgram(program));
    }

    fn create_vertex_array(&self) -> GLuint {
        let id = self.next();
        self.record(Call::CreateVertexArray(id));
        id
    }

    fn bind_vertex_array(&self, vao: GLuint) {
        self.record(Call::BindVertexArray(vao));
    }

    fn delete_vertex_array(&self, vao: GLuint) {
        self.record(Call::DeleteVertexArray(vao));
    }

    fn create_buffer(&self) -> GLuint {
        let id = self.next();
        self.record(Call::CreateBuffer(id));
        id
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: GLuint) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        self.record(Call::BufferData(target, data.to_vec()));
    }

    fn delete_buffer(&self, buffer: GLuint) {
        self.record(Call::DeleteBuffer(buffer));
    }

    fn vertex_attrib_pointer_f32(&self, index: GLuint, size: GLint, stride: GLsizei, offset: usize) {
        self.record(Call::VertexAttribPointer {
            index,
            size,
            stride,
            offset,
        });
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        self.record(Call::ClearColor(rgba));
    }

    fn clear(&self, mask: GLbitfield) {
        self.record(Call::Clear(mask));
    }

    fn draw_elements(&self, mode: GLenum, count: GLsizei) {
        self.record(Call::DrawElements(mode, count));
    }

    fn viewport(&self, width: GLsizei, height: GLsizei) {
        self.record(Call::Viewport(width, height));
    }
}
