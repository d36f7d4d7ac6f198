//! # Free-look camera
//!
//! Turns movement and look commands into a view matrix. Unlike scene
//! transforms the camera has no dirty flag: every mutator recomputes the
//! basis vectors and the view matrix before returning, so
//! [`Camera::view_matrix`] is always current.
//!
//! ## Orientation
//! - Yaw and pitch are stored in degrees.
//! - Yaw -90° with pitch 0° looks down -Z.
//! - Pitch is clamped to [-89°, 89°] so the forward vector never becomes
//!   parallel to world up.

use crate::core::config::CameraConfig;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Pitch limit in degrees
pub const PITCH_LIMIT: f32 = 89.0;

/// Movement direction relative to the camera's orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    /// Along the forward vector
    Forward,
    /// Against the forward vector
    Backward,
    /// Against the right vector
    Left,
    /// Along the right vector
    Right,
}

/// First-person camera with eagerly cached view matrix
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,

    forward: Vec3,
    right: Vec3,
    up: Vec3,

    speed: f32,
    sensitivity: f32,

    view: Mat4,
}

impl Camera {
    /// Default movement speed in units per second
    pub const DEFAULT_SPEED: f32 = 5.0;

    /// Default look sensitivity in degrees per input unit
    pub const DEFAULT_SENSITIVITY: f32 = 0.1;

    /// Create a camera at `position` with the given orientation in degrees
    ///
    /// `pitch` is clamped to [-89, 89].
    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            world_up,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            forward: Vec3::new(0.0, 0.0, -1.0),
            right: Vec3::x(),
            up: Vec3::y(),
            speed: Self::DEFAULT_SPEED,
            sensitivity: Self::DEFAULT_SENSITIVITY,
            view: Mat4::identity(),
        };
        camera.update_camera_vectors();
        camera
    }

    /// Create a camera from configuration
    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::new(
            Vec3::from(config.position),
            Vec3::from(config.world_up),
            config.yaw,
            config.pitch,
        );
        camera.speed = config.speed;
        camera.sensitivity = config.sensitivity;
        camera
    }

    /// Move along the cached axes by `speed * delta_time`
    pub fn process_movement(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.speed * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.forward * velocity,
            CameraMovement::Backward => self.position -= self.forward * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }

        self.update_camera_vectors();
    }

    /// Apply a look offset (e.g. mouse delta)
    ///
    /// Positive `x_offset` turns left (yaw decreases), positive `y_offset`
    /// pitches up.
    pub fn process_look(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw -= x_offset * self.sensitivity;
        self.pitch = (self.pitch + y_offset * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        self.update_camera_vectors();
    }

    /// Teleport the camera, keeping its orientation
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_camera_vectors();
    }

    /// Set movement speed in units per second
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Set look sensitivity
    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
    }

    /// Cached world-to-view matrix
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view
    }

    /// View matrix with translation removed, for geometry drawn at infinity
    pub fn skybox_view_matrix(&self) -> Mat4 {
        self.view.without_translation()
    }

    /// Camera position in world space
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees, always within [-89, 89]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Unit forward vector
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Unit right vector
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit up vector
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Movement speed
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Look sensitivity
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    fn update_camera_vectors(&mut self) {
        let yaw = utils::deg_to_rad(self.yaw);
        let pitch = utils::deg_to_rad(self.pitch);

        self.forward =
            Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize();
        self.right = self.forward.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.forward).normalize();

        self.view = Mat4::look_at(self.position, self.position + self.forward, self.up);

        log::trace!(
            "Camera updated - position: {:?}, yaw: {:.2}, pitch: {:.2}",
            self.position,
            self.yaw,
            self.pitch
        );
    }
}

impl Default for Camera {
    /// Camera at the origin looking down -Z with Y up
    fn default() -> Self {
        Self::new(Vec3::zeros(), Vec3::y(), -90.0, 0.0)
    }
}
