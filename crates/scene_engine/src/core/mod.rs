//! # Core Engine Module
//!
//! Shared configuration types used by hosts of the scene engine.
//!
//! - **Config**: viewer, camera, projection and light settings

pub mod config;

pub use config::{CameraConfig, EngineConfig, LightConfig, ProjectionConfig, ViewerConfig};
pub use crate::config::{Config, ConfigError, ConfigFormat};
