pub mod config;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use config::core::AppConfig;
pub use render::api::{GlFunctions, GraphicsApi};
pub use render::mesh::FanMesh;
pub use render::pipeline::FramePipeline;
pub use render::program::ShaderProgram;
pub use render::shaders::{ShaderSource, StageKind};
pub use utils::error::{InitError, ShaderError};
