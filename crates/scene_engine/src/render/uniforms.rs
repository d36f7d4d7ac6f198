//! GPU-ready uniform blocks handed to the render backend
//!
//! Matrices are stored column-major as `[[f32; 4]; 4]`, which is the layout
//! both std140 and the nalgebra conversion produce. Every block is built only
//! from `f32` arrays, so there is no implicit padding.

use crate::foundation::math::{Mat4, Vec3};

use super::camera::Camera;
use super::light::ShadowLight;
use super::projection::Projection;

/// Per-draw object data
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectUniforms {
    /// Model matrix (object to world space)
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of the model's upper 3x3, padded to 4x4
    pub normal_matrix: [[f32; 4]; 4],
}

/// Per-frame camera data
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraUniforms {
    /// View matrix (world to camera space)
    pub view: [[f32; 4]; 4],
    /// Projection matrix (camera to clip space)
    pub projection: [[f32; 4]; 4],
    /// Pre-computed projection * view
    pub view_projection: [[f32; 4]; 4],
    /// Camera position in world space (w = 1)
    pub position: [f32; 4],
}

/// Shadow light data
///
/// Colours are padded to `vec4` (w = 0) to keep std140 alignment.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightUniforms {
    /// Light projection * light view
    pub world_to_clip: [[f32; 4]; 4],
    /// Light position in world space (w = 1)
    pub position: [f32; 4],
    /// Ambient colour
    pub ambient: [f32; 4],
    /// Diffuse colour
    pub diffuse: [f32; 4],
    /// Specular colour
    pub specular: [f32; 4],
}

// Plain f32 arrays with repr(C): no padding, every bit pattern valid
unsafe impl bytemuck::Pod for ObjectUniforms {}
unsafe impl bytemuck::Zeroable for ObjectUniforms {}

unsafe impl bytemuck::Pod for CameraUniforms {}
unsafe impl bytemuck::Zeroable for CameraUniforms {}

unsafe impl bytemuck::Pod for LightUniforms {}
unsafe impl bytemuck::Zeroable for LightUniforms {}

fn point4(position: Vec3) -> [f32; 4] {
    [position.x, position.y, position.z, 1.0]
}

fn colour4(colour: Vec3) -> [f32; 4] {
    [colour.x, colour.y, colour.z, 0.0]
}

impl ObjectUniforms {
    /// Build from a world matrix
    ///
    /// A singular model (e.g. zero scale) gets an identity normal matrix.
    pub fn from_world(model: &Mat4) -> Self {
        let normal = model
            .fixed_view::<3, 3>(0, 0)
            .into_owned()
            .try_inverse()
            .map_or_else(Mat4::identity, |inverse| inverse.transpose().to_homogeneous());

        Self {
            model: (*model).into(),
            normal_matrix: normal.into(),
        }
    }

    /// Raw bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl CameraUniforms {
    /// Build from a camera and its projection
    pub fn new(camera: &Camera, projection: &Projection) -> Self {
        let view = *camera.view_matrix();
        let projection = projection.matrix();

        Self {
            view: view.into(),
            projection: projection.into(),
            view_projection: (projection * view).into(),
            position: point4(camera.position()),
        }
    }

    /// Raw bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl LightUniforms {
    /// Build from a shadow light
    pub fn new(light: &ShadowLight) -> Self {
        let colours = light.colours();
        Self {
            world_to_clip: (*light.world_to_clip()).into(),
            position: point4(light.position()),
            ambient: colour4(colours.ambient),
            diffuse: colour4(colours.diffuse),
            specular: colour4(colours.specular),
        }
    }

    /// Raw bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
