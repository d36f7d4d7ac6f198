//! Projection parameters
//!
//! The camera only produces a view matrix; the projection is supplied
//! separately so the host can react to viewport changes without touching the
//! camera pose.

use crate::core::config::{LightConfig, ProjectionConfig};
use crate::foundation::math::{utils, Mat4, Mat4Ext};

/// Perspective or orthographic projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Symmetric perspective frustum
    Perspective {
        /// Vertical field of view in degrees
        fov_y_degrees: f32,
        /// Width over height
        aspect: f32,
        /// Near clip distance
        near: f32,
        /// Far clip distance
        far: f32,
    },
    /// Axis-aligned orthographic box
    Orthographic {
        /// Left clip plane
        left: f32,
        /// Right clip plane
        right: f32,
        /// Bottom clip plane
        bottom: f32,
        /// Top clip plane
        top: f32,
        /// Near clip distance
        near: f32,
        /// Far clip distance
        far: f32,
    },
}

impl Projection {
    /// Perspective projection
    pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::Perspective { fov_y_degrees, aspect, near, far }
    }

    /// Orthographic projection
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self::Orthographic { left, right, bottom, top, near, far }
    }

    /// Camera projection from configuration
    pub fn from_config(config: &ProjectionConfig, aspect: f32) -> Self {
        Self::perspective(config.fov_y_degrees, aspect, config.near, config.far)
    }

    /// Symmetric orthographic box for a shadow light
    pub fn from_light_config(config: &LightConfig) -> Self {
        let extent = config.half_extent;
        Self::orthographic(-extent, extent, -extent, extent, config.near, config.far)
    }

    /// Clip-space projection matrix
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Self::Perspective { fov_y_degrees, aspect, near, far } => {
                Mat4::perspective(utils::deg_to_rad(fov_y_degrees), aspect, near, far)
            }
            Self::Orthographic { left, right, bottom, top, near, far } => {
                Mat4::orthographic(left, right, bottom, top, near, far)
            }
        }
    }

    /// Update the aspect ratio after a viewport resize
    ///
    /// Orthographic projections are left unchanged.
    pub fn set_aspect_ratio(&mut self, new_aspect: f32) {
        if let Self::Perspective { aspect, .. } = self {
            // Only log noticeable changes to keep resize drags quiet
            if (*aspect - new_aspect).abs() > 0.01 {
                log::info!("Projection aspect ratio changed: {:.3} -> {:.3}", aspect, new_aspect);
            }
            *aspect = new_aspect;
        }
    }

    /// Near and far clip distances
    pub fn clip_range(&self) -> (f32, f32) {
        match *self {
            Self::Perspective { near, far, .. } | Self::Orthographic { near, far, .. } => {
                (near, far)
            }
        }
    }
}
