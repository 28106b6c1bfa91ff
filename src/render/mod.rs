pub mod api;
pub mod display;
pub mod mesh;
pub mod pipeline;
pub mod program;
pub mod shaders;

#[cfg(test)]
pub(crate) mod fake;

pub use api::{BufferTarget, GlFunctions, GraphicsApi};
pub use mesh::FanMesh;
pub use pipeline::FramePipeline;
pub use program::{compile_stage, compile_stage_diagnostic, CompiledStage, ShaderProgram};
pub use shaders::{ShaderSource, StageKind};
