//! Local transform with a cached world matrix
//!
//! A transform stores position, Euler rotation (degrees) and scale relative to
//! its parent. The world matrix is cached alongside and is only valid while the
//! dirty flag is clear; every setter raises the flag.
//!
//! # Rotation order
//!
//! The local rotation is `Ry * Rx * Rz`: yaw about Y, then pitch about X, then
//! roll about Z, each built from its own axis rotation. Existing scene data is
//! authored against this order, so it must not be replaced by a quaternion or
//! a different Euler sequence.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Spatial transform owned by a scene node
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
    world_matrix: Mat4,
    dirty: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            world_matrix: Mat4::identity(),
            dirty: true,
        }
    }
}

impl Transform {
    /// Identity transform, dirty until first computed
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the local position
    ///
    /// Components must be finite; this is not checked.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty = true;
    }

    /// Set the local Euler rotation in degrees (x = pitch, y = yaw, z = roll)
    pub fn set_rotation(&mut self, euler_degrees: Vec3) {
        self.rotation = euler_degrees;
        self.dirty = true;
    }

    /// Set the local scale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty = true;
    }

    /// Force the next graph update to recompute this subtree
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Local position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Local Euler rotation in degrees
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Local scale
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Whether the cached world matrix is stale
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Last computed world matrix; never recomputes
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    /// Build `T * (Ry * Rx * Rz) * S` from the local attributes
    pub fn compute_local_matrix(&self) -> Mat4 {
        let rotation_x = Mat4::rotation_x(utils::deg_to_rad(self.rotation.x));
        let rotation_y = Mat4::rotation_y(utils::deg_to_rad(self.rotation.y));
        let rotation_z = Mat4::rotation_z(utils::deg_to_rad(self.rotation.z));

        let rotation = rotation_y * rotation_x * rotation_z;

        Mat4::new_translation(&self.position) * rotation * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Recompute and cache the world matrix, clearing the dirty flag
    ///
    /// With a parent the result is `parent_world * local`, otherwise the local
    /// matrix alone.
    pub fn compute_world_matrix(&mut self, parent_world: Option<&Mat4>) -> Mat4 {
        let local = self.compute_local_matrix();
        self.world_matrix = match parent_world {
            Some(parent) => parent * local,
            None => local,
        };
        self.dirty = false;
        self.world_matrix
    }
}
