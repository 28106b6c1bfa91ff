pub mod error;

pub use error::{InitError, ShaderError};
