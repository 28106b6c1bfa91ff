//! The slice of OpenGL the demo talks to.
//!
//! Every GPU-touching operation takes an implementation of [`GraphicsApi`] as an explicit
//! parameter instead of reaching for global state. [`GlFunctions`] is the real implementation,
//! backed by the function table of the `gl` crate; tests substitute a recording fake.

use gl::types::*;
use std::ffi::{c_void, CStr};
use std::marker::PhantomData;
use std::ptr;

use super::shaders::StageKind;

/// Buffer binding points used by the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

impl BufferTarget {
    pub fn gl_enum(self) -> GLenum {
        match self {
            BufferTarget::Array => gl::ARRAY_BUFFER,
            BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// Object names are plain `GLuint`s; `0` is the null object.
pub trait GraphicsApi {
    fn create_shader(&self, kind: StageKind) -> GLuint;
    fn shader_source(&self, shader: GLuint, source: &CStr);
    fn compile_shader(&self, shader: GLuint);
    fn shader_compile_status(&self, shader: GLuint) -> bool;
    fn shader_info_log(&self, shader: GLuint) -> String;
    fn delete_shader(&self, shader: GLuint);

    fn create_program(&self) -> GLuint;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    fn validate_program(&self, program: GLuint);
    fn program_link_status(&self, program: GLuint) -> bool;
    fn program_validate_status(&self, program: GLuint) -> bool;
    fn program_info_log(&self, program: GLuint) -> String;
    fn use_program(&self, program: GLuint);
    fn delete_program(&self, program: GLuint);

    fn create_vertex_array(&self) -> GLuint;
    fn bind_vertex_array(&self, vao: GLuint);
    fn delete_vertex_array(&self, vao: GLuint);
    fn create_buffer(&self) -> GLuint;
    fn bind_buffer(&self, target: BufferTarget, buffer: GLuint);
    /// Uploads `data` to the buffer bound at `target` with `STATIC_DRAW` usage.
    fn buffer_data(&self, target: BufferTarget, data: &[u8]);
    fn delete_buffer(&self, buffer: GLuint);
    /// Enables attribute `index` and points it at f32 components in the bound array buffer.
    fn vertex_attrib_pointer_f32(&self, index: GLuint, size: GLint, stride: GLsizei, offset: usize);

    fn clear_color(&self, rgba: [f32; 4]);
    fn clear(&self, mask: GLbitfield);
    /// Draws `count` `u32` indices from the bound element buffer.
    fn draw_elements(&self, mode: GLenum, count: GLsizei);
    fn viewport(&self, width: GLsizei, height: GLsizei);
}

/// Proof that the `gl` function table has been loaded for the context current on this thread.
///
/// Not `Send` or `Sync`: a GL context is bound to the thread that made it current.
pub struct GlFunctions {
    _thread_bound: PhantomData<*const ()>,
}

impl GlFunctions {
    /// Loads every GL entry point through `loader`.
    ///
    /// # Safety
    ///
    /// The context the loader resolves symbols for must be current on the calling thread and
    /// stay current for as long as the returned value is used.
    pub unsafe fn load_with<F>(loader: F) -> Self
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);
        Self {
            _thread_bound: PhantomData,
        }
    }

    /// Whether the entry points the demo needs resolved to real functions.
    pub fn function_table_loaded(&self) -> bool {
        gl::GetString::is_loaded()
            && gl::CreateShader::is_loaded()
            && gl::CreateProgram::is_loaded()
            && gl::GenBuffers::is_loaded()
            && gl::GenVertexArrays::is_loaded()
            && gl::DrawElements::is_loaded()
    }

    pub fn version(&self) -> Option<String> {
        let version = unsafe { gl::GetString(gl::VERSION) };
        if version.is_null() {
            return None;
        }
        let version = unsafe { CStr::from_ptr(version as *const GLchar) };
        Some(version.to_string_lossy().into_owned())
    }
}

fn read_info_log(len: GLint, fetch: impl FnOnce(GLsizei, *mut GLsizei, *mut GLchar)) -> String {
    if len <= 0 {
        return String::new();
    }

    let mut buffer: Vec<u8> = vec![0; len as usize];
    let mut written: GLsizei = 0;
    fetch(len, &mut written, buffer.as_mut_ptr() as *mut GLchar);
    buffer.truncate(written.clamp(0, len) as usize);

    String::from_utf8_lossy(&buffer).trim_end().to_string()
}

impl GraphicsApi for GlFunctions {
    fn create_shader(&self, kind: StageKind) -> GLuint {
        unsafe { gl::CreateShader(kind.gl_enum()) }
    }

    fn shader_source(&self, shader: GLuint, source: &CStr) {
        unsafe {
            gl::ShaderSource(shader, 1, &source.as_ptr(), ptr::null());
        }
    }

    fn compile_shader(&self, shader: GLuint) {
        unsafe {
            gl::CompileShader(shader);
        }
    }

    fn shader_compile_status(&self, shader: GLuint) -> bool {
        let mut success = gl::FALSE as GLint;
        unsafe {
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
        }
        success != gl::FALSE as GLint
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        let mut len = 0;
        unsafe {
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
        }
        read_info_log(len, |len, written, buffer| unsafe {
            gl::GetShaderInfoLog(shader, len, written, buffer);
        })
    }

    fn delete_shader(&self, shader: GLuint) {
        unsafe {
            gl::DeleteShader(shader);
        }
    }

    fn create_program(&self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe {
            gl::AttachShader(program, shader);
        }
    }

    fn link_program(&self, program: GLuint) {
        unsafe {
            gl::LinkProgram(program);
        }
    }

    fn validate_program(&self, program: GLuint) {
        unsafe {
            gl::ValidateProgram(program);
        }
    }

    fn program_link_status(&self, program: GLuint) -> bool {
        let mut success = gl::FALSE as GLint;
        unsafe {
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
        }
        success != gl::FALSE as GLint
    }

    fn program_validate_status(&self, program: GLuint) -> bool {
        let mut success = gl::FALSE as GLint;
        unsafe {
            gl::GetProgramiv(program, gl::VALIDATE_STATUS, &mut success);
        }
        success != gl::FALSE as GLint
    }

    fn program_info_log(&self, program: GLuint) -> String {
        let mut len = 0;
        unsafe {
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        }
        read_info_log(len, |len, written, buffer| unsafe {
            gl::GetProgramInfoLog(program, len, written, buffer);
        })
    }

    fn use_program(&self, program: GLuint) {
        unsafe {
            gl::UseProgram(program);
        }
    }

    fn delete_program(&self, program: GLuint) {
        unsafe {
            gl::DeleteProgram(program);
        }
    }

    fn create_vertex_array(&self) -> GLuint {
        let mut vao = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
        }
        vao
    }

    fn bind_vertex_array(&self, vao: GLuint) {
        unsafe {
            gl::BindVertexArray(vao);
        }
    }

    fn delete_vertex_array(&self, vao: GLuint) {
        unsafe {
            gl::DeleteVertexArrays(1, &vao);
        }
    }

    fn create_buffer(&self) -> GLuint {
        let mut buffer = 0;
        unsafe {
            gl::GenBuffers(1, &mut buffer);
        }
        buffer
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: GLuint) {
        unsafe {
            gl::BindBuffer(target.gl_enum(), buffer);
        }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        unsafe {
            gl::BufferData(
                target.gl_enum(),
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );
        }
    }

    fn delete_buffer(&self, buffer: GLuint) {
        unsafe {
            gl::DeleteBuffers(1, &buffer);
        }
    }

    fn vertex_attrib_pointer_f32(&self, index: GLuint, size: GLint, stride: GLsizei, offset: usize) {
        unsafe {
            gl::EnableVertexAttribArray(index);
            gl::VertexAttribPointer(
                index,
                size,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset as *const c_void,
            );
        }
    }

    fn clear_color(&self, [r, g, b, a]: [f32; 4]) {
        unsafe {
            gl::ClearColor(r, g, b, a);
        }
    }

    fn clear(&self, mask: GLbitfield) {
        unsafe {
            gl::Clear(mask);
        }
    }

    fn draw_elements(&self, mode: GLenum, count: GLsizei) {
        unsafe {
            gl::DrawElements(mode, count, gl::UNSIGNED_INT, ptr::null());
        }
    }

    fn viewport(&self, width: GLsizei, height: GLsizei) {
        unsafe {
            gl::Viewport(0, 0, width, height);
        }
    }
}
