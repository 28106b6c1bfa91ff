use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Line {line} appears before any #shader marker")]
    OrphanLine { line: usize },

    #[error("Line {line} is a #shader marker without a known stage: {text:?}")]
    UnknownStage { line: usize, text: String },

    #[error("No #shader marker found")]
    NoStageMarker,
}

/// Fatal startup failures. Any of these ends the process with status -1.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("Event loop creation failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Display creation failed: {0}")]
    Display(String),

    #[error("OpenGL context error: {0}")]
    Context(#[from] glutin::error::Error),

    #[error("Failed to read config {path:?}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("Failed to parse config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ShaderError>;
