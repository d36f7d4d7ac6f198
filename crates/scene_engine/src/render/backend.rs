//! Render backend boundary
//!
//! The scene core never talks to a graphics API. It hands a backend the
//! per-frame camera block, optionally the shadow light, and one object block
//! plus an opaque payload (mesh/material reference) per node.

use thiserror::Error;

use super::uniforms::{CameraUniforms, LightUniforms, ObjectUniforms};

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Errors reported across the backend boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Backend-specific failure
    #[error("Render backend error: {0}")]
    Backend(String),

    /// A draw was issued outside `begin_frame` / `end_frame`
    #[error("Draw issued before begin_frame")]
    FrameNotStarted,

    /// `begin_frame` was called while a frame was still open
    #[error("begin_frame called before the previous frame ended")]
    FrameInProgress,
}

/// Consumer of world matrices and payloads
pub trait RenderBackend<P> {
    /// Start a frame with the camera's view and projection
    fn begin_frame(&mut self, camera: &CameraUniforms) -> BackendResult<()>;

    /// Provide the shadow light for this frame
    fn set_shadow_light(&mut self, _light: &LightUniforms) -> BackendResult<()> {
        Ok(())
    }

    /// Draw one node
    fn draw(&mut self, object: &ObjectUniforms, payload: &P) -> BackendResult<()>;

    /// Finish the frame
    fn end_frame(&mut self) -> BackendResult<()>;

    /// Drop an open frame after a failed call, without presenting it
    fn abort_frame(&mut self) {}
}

/// One call recorded by [`RecordingBackend`]
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall<P> {
    /// `begin_frame`
    BeginFrame(CameraUniforms),
    /// `set_shadow_light`
    ShadowLight(LightUniforms),
    /// `draw`
    Draw(ObjectUniforms, P),
    /// `end_frame`
    EndFrame,
    /// `abort_frame`
    AbortFrame,
}

/// In-memory backend that records every call
///
/// Useful for headless hosts and for checking submission order.
#[derive(Debug, Clone)]
pub struct RecordingBackend<P> {
    calls: Vec<RecordedCall<P>>,
    in_frame: bool,
}

impl<P> Default for RecordingBackend<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> RecordingBackend<P> {
    /// Empty recorder
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            in_frame: false,
        }
    }

    /// Calls recorded so far
    pub fn calls(&self) -> &[RecordedCall<P>] {
        &self.calls
    }

    /// Payloads of every draw, in order
    pub fn drawn_payloads(&self) -> Vec<&P> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Draw(_, payload) => Some(payload),
                _ => None,
            })
            .collect()
    }

    /// Whether a frame is open
    pub fn in_frame(&self) -> bool {
        self.in_frame
    }

    /// Forget recorded calls and close any open frame
    pub fn clear(&mut self) {
        self.calls.clear();
        self.in_frame = false;
    }
}

impl<P: Clone> RenderBackend<P> for RecordingBackend<P> {
    fn begin_frame(&mut self, camera: &CameraUniforms) -> BackendResult<()> {
        if self.in_frame {
            return Err(RenderError::FrameInProgress);
        }
        self.in_frame = true;
        self.calls.push(RecordedCall::BeginFrame(*camera));
        Ok(())
    }

    fn set_shadow_light(&mut self, light: &LightUniforms) -> BackendResult<()> {
        if !self.in_frame {
            return Err(RenderError::FrameNotStarted);
        }
        self.calls.push(RecordedCall::ShadowLight(*light));
        Ok(())
    }

    fn draw(&mut self, object: &ObjectUniforms, payload: &P) -> BackendResult<()> {
        if !self.in_frame {
            return Err(RenderError::FrameNotStarted);
        }
        self.calls.push(RecordedCall::Draw(*object, payload.clone()));
        Ok(())
    }

    fn end_frame(&mut self) -> BackendResult<()> {
        if !self.in_frame {
            return Err(RenderError::FrameNotStarted);
        }
        self.in_frame = false;
        self.calls.push(RecordedCall::EndFrame);
        Ok(())
    }

    fn abort_frame(&mut self) {
        if self.in_frame {
            self.in_frame = false;
            self.calls.push(RecordedCall::AbortFrame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Mat4;

    #[test]
    fn test_draw_outside_frame_rejected() {
        let mut backend = RecordingBackend::new();
        let object = ObjectUniforms::from_world(&Mat4::identity());

        assert_eq!(backend.draw(&object, &"mesh"), Err(RenderError::FrameNotStarted));
        assert_eq!(backend.end_frame(), Err(RenderError::FrameNotStarted));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_records_in_order() {
        let mut backend = RecordingBackend::new();
        let camera: CameraUniforms = bytemuck::Zeroable::zeroed();
        let object = ObjectUniforms::from_world(&Mat4::identity());

        backend.begin_frame(&camera).unwrap();
        backend.draw(&object, &"a").unwrap();
        backend.draw(&object, &"b").unwrap();
        backend.end_frame().unwrap();

        assert_eq!(backend.calls().len(), 4);
        assert_eq!(backend.drawn_payloads(), vec![&"a", &"b"]);
        assert_eq!(backend.calls()[3], RecordedCall::EndFrame);

        backend.clear();
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_nested_begin_rejected() {
        let mut backend = RecordingBackend::<&str>::new();
        let camera: CameraUniforms = bytemuck::Zeroable::zeroed();

        backend.begin_frame(&camera).unwrap();
        assert_eq!(backend.begin_frame(&camera), Err(RenderError::FrameInProgress));
        assert_eq!(backend.calls().len(), 1);

        backend.end_frame().unwrap();
        assert!(!backend.in_frame());
        backend.begin_frame(&camera).unwrap();
        assert_eq!(backend.calls().len(), 3);
    }

    #[test]
    fn test_abort_closes_open_frame() {
        let mut backend = RecordingBackend::<&str>::new();
        let camera: CameraUniforms = bytemuck::Zeroable::zeroed();

        backend.abort_frame();
        assert!(backend.calls().is_empty());

        backend.begin_frame(&camera).unwrap();
        backend.abort_frame();

        assert!(!backend.in_frame());
        assert_eq!(backend.calls()[1], RecordedCall::AbortFrame);
        assert_eq!(backend.end_frame(), Err(RenderError::FrameNotStarted));
    }

    #[test]
    fn test_clear_closes_open_frame() {
        let mut backend = RecordingBackend::<&str>::new();
        let camera: CameraUniforms = bytemuck::Zeroable::zeroed();
        backend.begin_frame(&camera).unwrap();

        backend.clear();

        assert!(!backend.in_frame());
        backend.begin_frame(&camera).unwrap();
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(RenderError::FrameNotStarted.to_string(), "Draw issued before begin_frame");
        assert_eq!(
            RenderError::Backend("device lost".to_string()).to_string(),
            "Render backend error: device lost"
        );
    }
}
