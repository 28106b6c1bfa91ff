use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use super::rendering::{RenderConfig, WindowConfig};
use crate::utils::InitError;

pub const DEFAULT_CONFIG_PATH: &str = "fanmesh.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: Option<String>,
    pub window: WindowConfig,
    pub rendering: RenderConfig,
}

impl AppConfig {
    /// Loads the config at `path`, falling back to defaults when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, InitError> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(InitError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::from_toml(&text).map_err(|source| InitError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|level| LevelFilter::from_str(level).ok())
            .unwrap_or(LevelFilter::Info)
    }
}
