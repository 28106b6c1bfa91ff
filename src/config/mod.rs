pub mod core;
pub mod rendering;

pub use self::core::{AppConfig, DEFAULT_CONFIG_PATH};
pub use rendering::{RenderConfig, WindowConfig};
