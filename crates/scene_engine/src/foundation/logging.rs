//! Logging setup
//!
//! Library code only talks to the `log` facade. Hosts pick the sink here.

pub use log::{debug, error, info, trace, warn};

/// Initialize env_logger from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize env_logger with a default level
///
/// `RUST_LOG` still overrides the default. An unparseable `level` falls back
/// to `info`. Calling this twice is harmless; the second call is ignored.
pub fn init_with_level(level: &str) {
    let filter = level.parse::<log::LevelFilter>().unwrap_or(log::LevelFilter::Info);

    let result = env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .try_init();

    if result.is_err() {
        log::debug!("Logger already initialized, keeping existing configuration");
    }
}
