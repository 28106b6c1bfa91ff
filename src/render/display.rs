//! Display configuration selection for the window bootstrap.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::utils::InitError;

pub const NO_GL_CONFIG: &str = "display offered no GL configs";

/// Keeps the first config with the highest sample count.
pub fn highest_sample_count<C>(
    configs: impl Iterator<Item = C>,
    samples: impl Fn(&C) -> u8,
) -> Option<C> {
    configs.reduce(|best, config| {
        if samples(&config) > samples(&best) {
            config
        } else {
            best
        }
    })
}

/// Runs `step`, reporting a panic inside it as `InitError::Display`.
///
/// The glutin config picker has no error channel, so an empty config set unwinds out of it.
pub fn catch_display_panic<T>(step: impl FnOnce() -> T) -> Result<T, InitError> {
    panic::catch_unwind(AssertUnwindSafe(step))
        .map_err(|payload| InitError::Display(panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "display setup panicked".to_string()
    }
}
