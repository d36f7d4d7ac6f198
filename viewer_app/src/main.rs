//! Scene viewer demo
//!
//! Runs the orbit scene headless for a fixed number of frames and logs what a
//! renderer would draw. Pass a `.toml` or `.ron` configuration path as the
//! first argument; without one the built-in defaults are used.

mod viewer;

use scene_engine::config::Config;
use scene_engine::core::config::ViewerConfig;
use scene_engine::foundation::logging;

use viewer::{LoggingBackend, Viewer, ViewerError};

fn load_config() -> Result<ViewerConfig, ViewerError> {
    match std::env::args().nth(1) {
        Some(path) => Ok(ViewerConfig::load_from_file(path)?),
        None => Ok(ViewerConfig::default()),
    }
}

fn main() -> Result<(), ViewerError> {
    // Set up panic hook for better error reporting
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC occurred: {:?}", panic_info);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "Panic location: {}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            );
        }
    }));

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            logging::init();
            log::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    logging::init_with_level(&config.engine.log_level);
    log::info!("Starting scene viewer");

    let mut viewer = Viewer::new(config)?;
    let mut backend = LoggingBackend::default();

    match viewer.run(&mut backend) {
        Ok(report) => {
            log::info!(
                "Scene viewer completed: {} frames, {} draws logged, {} world matrices \
                 recomputed, {:.1} FPS average",
                report.frames,
                backend.total_draws(),
                report.recomputed,
                report.average_fps
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Scene viewer failed: {}", e);
            Err(e)
        }
    }
}
