// shaders.rs - Single-file shader sources split into stages

use gl::types::GLenum;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::utils::error::{Result, ShaderError};

/// Lines containing this token (in any case) start a new stage section.
pub const STAGE_MARKER: &str = "#shader";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    pub fn name(self) -> &'static str {
        match self {
            StageKind::Vertex => "vertex",
            StageKind::Fragment => "fragment",
        }
    }

    pub fn gl_enum(self) -> GLenum {
        match self {
            StageKind::Vertex => gl::VERTEX_SHADER,
            StageKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    /// Expects an already lowercased marker line.
    fn from_marker(line: &str) -> Option<Self> {
        if line.contains(StageKind::Vertex.name()) {
            Some(StageKind::Vertex)
        } else if line.contains(StageKind::Fragment.name()) {
            Some(StageKind::Fragment)
        } else {
            None
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Vertex and fragment stage sources read from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    /// Splits `text` on `#shader <stage>` marker lines.
    ///
    /// Every other line goes, with a trailing newline, to the stage named by the closest marker
    /// above it. Blank lines before the first marker are skipped; anything else there is an
    /// error, as is a marker that names no known stage or text with no marker at all.
    pub fn parse(text: &str) -> Result<Self> {
        let mut source = Self::default();
        let mut current: Option<StageKind> = None;

        for (index, line) in text.lines().enumerate() {
            let lowered = line.to_ascii_lowercase();
            if lowered.contains(STAGE_MARKER) {
                let kind = StageKind::from_marker(&lowered).ok_or_else(|| {
                    ShaderError::UnknownStage {
                        line: index + 1,
                        text: line.to_string(),
                    }
                })?;
                current = Some(kind);
                continue;
            }

            match current {
                Some(kind) => {
                    let blob = source.stage_mut(kind);
                    blob.push_str(line);
                    blob.push('\n');
                }
                None if line.trim().is_empty() => {}
                None => return Err(ShaderError::OrphanLine { line: index + 1 }),
            }
        }

        if current.is_none() {
            return Err(ShaderError::NoStageMarker);
        }

        Ok(source)
    }

    /// Reads and splits the shader file at `path`.
    ///
    /// A missing file is not an error: it yields two empty stages, which then fail to compile.
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than rejecting the file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match fs::read(path) {
            Ok(bytes) => Self::parse(&String::from_utf8_lossy(&bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!("Shader file {:?} not found", path);
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn stage(&self, kind: StageKind) -> &str {
        match kind {
            StageKind::Vertex => &self.vertex,
            StageKind::Fragment => &self.fragment,
        }
    }

    fn stage_mut(&mut self, kind: StageKind) -> &mut String {
        match kind {
            StageKind::Vertex => &mut self.vertex,
            StageKind::Fragment => &mut self.fragment,
        }
    }
}
