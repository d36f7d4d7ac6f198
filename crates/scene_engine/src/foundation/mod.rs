//! Foundation module - Core utilities and types
//!
//! - Math types and matrix constructors
//! - Frame timing
//! - Logging setup

pub mod math;
pub mod time;
pub mod logging;
