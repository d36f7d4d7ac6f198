//! Shadow-casting light
//!
//! Holds the light's position, look-at target and projection, and caches the
//! light-space view and world-to-clip matrices that the shadow pass renders
//! depth with. Like the camera, every setter recomputes eagerly. The
//! ambient, diffuse and specular colours ride along for the shading pass.

use crate::core::config::LightConfig;
use crate::foundation::math::{Mat4, Mat4Ext, Vec3};

use super::projection::Projection;

/// Light with a cached world-to-clip transform
#[derive(Debug, Clone)]
pub struct ShadowLight {
    position: Vec3,
    center: Vec3,
    up: Vec3,
    projection: Projection,
    view: Mat4,
    world_to_clip: Mat4,
    colours: LightColours,
}

/// Phong colour terms of a light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightColours {
    /// Ambient colour
    pub ambient: Vec3,
    /// Diffuse colour
    pub diffuse: Vec3,
    /// Specular colour
    pub specular: Vec3,
}

impl Default for LightColours {
    fn default() -> Self {
        Self {
            ambient: Vec3::new(0.2, 0.2, 0.2),
            diffuse: Vec3::new(0.5, 0.5, 0.5),
            specular: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl ShadowLight {
    /// Light at `position` aimed at the origin
    ///
    /// The default up vector is -Y, which is what the shadow pass samples
    /// against.
    pub fn new(position: Vec3, projection: Projection) -> Self {
        let mut light = Self {
            position,
            center: Vec3::zeros(),
            up: Vec3::new(0.0, -1.0, 0.0),
            projection,
            view: Mat4::identity(),
            world_to_clip: Mat4::identity(),
            colours: LightColours::default(),
        };
        light.update_matrices();
        light
    }

    /// Light from configuration
    pub fn from_config(config: &LightConfig) -> Self {
        let projection = Projection::from_light_config(config);
        let mut light = Self::new(Vec3::from(config.position), projection);
        light.set_view(Vec3::from(config.center), Vec3::from(config.up));
        light.set_colours(LightColours {
            ambient: Vec3::from(config.ambient),
            diffuse: Vec3::from(config.diffuse),
            specular: Vec3::from(config.specular),
        });
        light
    }

    /// Move the light, keeping its target and up vector
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_matrices();
    }

    /// Replace the projection
    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
        self.update_matrices();
    }

    /// Aim the light at `center` with the given up vector
    pub fn set_view(&mut self, center: Vec3, up: Vec3) {
        self.center = center;
        self.up = up;
        self.update_matrices();
    }

    /// Replace the colour terms
    ///
    /// Colours do not affect any cached matrix.
    pub fn set_colours(&mut self, colours: LightColours) {
        self.colours = colours;
    }

    /// Colour terms
    pub fn colours(&self) -> &LightColours {
        &self.colours
    }

    /// Light position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Look-at target
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Current projection
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Cached light-space view matrix
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view
    }

    /// Cached `projection * view`
    pub fn world_to_clip(&self) -> &Mat4 {
        &self.world_to_clip
    }

    fn update_matrices(&mut self) {
        self.view = Mat4::look_at(self.position, self.center, self.up);
        self.world_to_clip = self.projection.matrix() * self.view;
        log::trace!(
            "Shadow light updated - position: {:?}, center: {:?}",
            self.position,
            self.center
        );
    }
}
