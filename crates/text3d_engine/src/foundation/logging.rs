//! Logging utilities

pub use log::{debug, info, warn, error, trace};

use env_logger::Env;

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence; `default_level` is used when it is unset.
pub fn init(default_level: &str) {
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();
}
