use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Physics Engine".into(),
            width: 640,
            height: 480,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub shader_path: String,
    pub clear_color: [f32; 4],
    pub vsync: bool,
    /// Requested OpenGL version (major, minor).
    pub gl_version: (u8, u8),
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shader_path: "res/shaders/Basic.shader".into(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            vsync: true,
            gl_version: (3, 3),
        }
    }
}
