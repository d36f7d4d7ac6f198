//! Frame submission
//!
//! Reads cached world matrices out of a walked scene graph and hands them to a
//! [`RenderBackend`] together with each node's payload. Submission never
//! recomputes anything; run the graph walk first.

use crate::scene::{NodeId, SceneGraph};

use super::backend::{BackendResult, RenderBackend};
use super::camera::Camera;
use super::light::ShadowLight;
use super::projection::Projection;
use super::uniforms::{CameraUniforms, LightUniforms, ObjectUniforms};

/// Per-frame view state shared by every draw
pub struct FrameSubmitter<'a> {
    camera: &'a Camera,
    projection: &'a Projection,
    light: Option<&'a ShadowLight>,
}

impl<'a> FrameSubmitter<'a> {
    /// Submitter for one camera and projection
    pub fn new(camera: &'a Camera, projection: &'a Projection) -> Self {
        Self {
            camera,
            projection,
            light: None,
        }
    }

    /// Also provide a shadow light to the backend
    pub fn with_shadow_light(mut self, light: &'a ShadowLight) -> Self {
        self.light = Some(light);
        self
    }

    /// Draw every node under `roots`, depth-first in insertion order
    ///
    /// Returns the number of draws issued. A node that is still dirty is drawn
    /// with its stale cached matrix. If a call fails after `begin_frame`, the
    /// frame is aborted before the error is returned.
    pub fn submit<P, B>(
        &self,
        graph: &SceneGraph<P>,
        roots: &[NodeId],
        backend: &mut B,
    ) -> BackendResult<usize>
    where
        B: RenderBackend<P> + ?Sized,
    {
        backend.begin_frame(&CameraUniforms::new(self.camera, self.projection))?;

        let draws = match self.draw_all(graph, roots, backend) {
            Ok(draws) => draws,
            Err(e) => {
                log::error!("Aborting frame: {}", e);
                backend.abort_frame();
                return Err(e);
            }
        };

        backend.end_frame()?;
        log::trace!("Submitted {} draws", draws);
        Ok(draws)
    }

    fn draw_all<P, B>(
        &self,
        graph: &SceneGraph<P>,
        roots: &[NodeId],
        backend: &mut B,
    ) -> BackendResult<usize>
    where
        B: RenderBackend<P> + ?Sized,
    {
        if let Some(light) = self.light {
            backend.set_shadow_light(&LightUniforms::new(light))?;
        }

        let mut draws = 0;
        for &root in roots {
            for id in graph.depth_first(root) {
                let Some(node) = graph.node(id) else { continue };
                let transform = node.transform();
                if transform.is_dirty() {
                    log::warn!(
                        "Drawing node {:?} with a stale world matrix; walk the graph first",
                        id
                    );
                }

                let object = ObjectUniforms::from_world(transform.world_matrix());
                backend.draw(&object, node.payload())?;
                draws += 1;
            }
        }
        Ok(draws)
    }
}

/// Submit one frame; see [`FrameSubmitter::submit`]
pub fn submit_frame<P, B>(
    graph: &SceneGraph<P>,
    roots: &[NodeId],
    camera: &Camera,
    projection: &Projection,
    light: Option<&ShadowLight>,
    backend: &mut B,
) -> BackendResult<usize>
where
    B: RenderBackend<P> + ?Sized,
{
    let mut submitter = FrameSubmitter::new(camera, projection);
    if let Some(light) = light {
        submitter = submitter.with_shadow_light(light);
    }
    submitter.submit(graph, roots, backend)
}
