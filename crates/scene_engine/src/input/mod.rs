//! Input mapping
//!
//! Translates host key and cursor events into camera commands. The host owns
//! the window and event loop; this module only sees engine [`KeyCode`]s and
//! absolute cursor positions.

pub mod camera_controller;

pub use camera_controller::{CameraController, MouseLook, MovementKeys};

/// Key codes the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// W key
    W,
    /// A key
    A,
    /// S key
    S,
    /// D key
    D,
    /// Escape key (requests quit)
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}
