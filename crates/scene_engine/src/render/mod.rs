//! # Rendering Boundary
//!
//! Everything between the scene graph and a graphics API. The engine never
//! issues API calls itself; it produces matrices and hands them across the
//! [`RenderBackend`] trait.
//!
//! ## Architecture
//!
//! - **Camera**: free-look view matrix driven by movement and look input
//! - **Projection**: perspective or orthographic clip matrices
//! - **ShadowLight**: light-space view and world-to-clip matrices
//! - **Uniforms**: `Pod` blocks laid out for direct upload
//! - **Submit**: depth-first draw submission of a walked scene graph

pub mod backend;
pub mod camera;
pub mod light;
pub mod projection;
pub mod submit;
pub mod uniforms;

pub use backend::{BackendResult, RecordedCall, RecordingBackend, RenderBackend, RenderError};
pub use camera::{Camera, CameraMovement};
pub use light::{LightColours, ShadowLight};
pub use projection::Projection;
pub use submit::{submit_frame, FrameSubmitter};
pub use uniforms::{CameraUniforms, LightUniforms, ObjectUniforms};
