//! # Viewer Configuration
//!
//! Top-level configuration for a scene viewer host: logging and window
//! metrics, the initial camera pose, the camera projection and the shadow
//! light. Every struct is `#[serde(default)]`, so a file only needs the keys
//! it wants to override.
//!
//! ```toml
//! [engine]
//! log_level = "debug"
//!
//! [camera]
//! position = [0.0, 1.0, 6.0]
//! speed = 3.0
//! ```
//!
//! Shader, texture and model paths belong to the resource layer and are not
//! configured here.

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};
use crate::foundation::math::{utils, Vec3};
use crate::render::camera::PITCH_LIMIT;

const BASIS_EPSILON: f32 = 1e-4;

/// Core host behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter (overridden by `RUST_LOG`)
    pub log_level: String,
    /// Framebuffer width in pixels
    pub window_width: u32,
    /// Framebuffer height in pixels
    pub window_height: u32,
    /// Stop after this many frames (`None` runs until the host quits)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_frames: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            window_width: 1024,
            window_height: 720,
            max_frames: None,
        }
    }
}

impl EngineConfig {
    /// Width over height of the framebuffer
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}

/// Initial camera pose and tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Start position
    pub position: [f32; 3],
    /// World up vector
    pub world_up: [f32; 3],
    /// Yaw in degrees (-90 looks down -Z)
    pub yaw: f32,
    /// Pitch in degrees
    pub pitch: f32,
    /// Movement speed in units per second
    pub speed: f32,
    /// Look sensitivity
    pub sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            world_up: [0.0, 1.0, 0.0],
            yaw: -90.0,
            pitch: 0.0,
            speed: 5.0,
            sensitivity: 0.1,
        }
    }
}

/// Camera perspective projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Shadow-casting light with an orthographic frustum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Light position
    pub position: [f32; 3],
    /// Point the light looks at
    pub center: [f32; 3],
    /// Up vector for the light's view
    pub up: [f32; 3],
    /// Orthographic half-extent of the shadow frustum
    pub half_extent: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
    /// Ambient colour
    pub ambient: [f32; 3],
    /// Diffuse colour
    pub diffuse: [f32; 3],
    /// Specular colour
    pub specular: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: [-2.0, 4.0, -1.0],
            center: [0.0, 0.0, 0.0],
            up: [0.0, -1.0, 0.0],
            half_extent: 10.0,
            near: 1.0,
            far: 7.5,
            ambient: [0.2, 0.2, 0.2],
            diffuse: [0.5, 0.5, 0.5],
            specular: [1.0, 1.0, 1.0],
        }
    }
}

/// Complete viewer configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Host behaviour
    pub engine: EngineConfig,
    /// Camera pose
    pub camera: CameraConfig,
    /// Camera projection
    pub projection: ProjectionConfig,
    /// Shadow light
    pub light: LightConfig,
}

impl ViewerConfig {
    /// Check value ranges the renderer relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.window_width == 0 || self.engine.window_height == 0 {
            return Err(ConfigError::Invalid("window dimensions must be non-zero".to_string()));
        }

        if self.engine.log_level.parse::<log::LevelFilter>().is_err() {
            let level = &self.engine.log_level;
            return Err(ConfigError::Invalid(format!("unknown log level '{level}'")));
        }

        let fov = self.projection.fov_y_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(ConfigError::Invalid(format!("field of view {fov} outside (0, 180)")));
        }

        check_clip_range("projection", self.projection.near, self.projection.far)?;
        check_clip_range("light", self.light.near, self.light.far)?;

        if !(self.light.half_extent > 0.0) {
            return Err(ConfigError::Invalid("light half_extent must be positive".to_string()));
        }

        for (name, colour) in [
            ("ambient", self.light.ambient),
            ("diffuse", self.light.diffuse),
            ("specular", self.light.specular),
        ] {
            if !colour.iter().all(|c| c.is_finite() && *c >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "light {name} colour {colour:?} must be finite and non-negative"
                )));
            }
        }

        let light_dir = Vec3::from(self.light.center) - Vec3::from(self.light.position);
        check_basis("light", light_dir, self.light.up)?;

        if !(self.camera.speed >= 0.0) {
            return Err(ConfigError::Invalid("camera speed must not be negative".to_string()));
        }

        let yaw = utils::deg_to_rad(self.camera.yaw);
        let pitch = utils::deg_to_rad(self.camera.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT));
        let forward = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());
        check_basis("camera", forward, self.camera.world_up)?;

        Ok(())
    }
}

fn check_clip_range(section: &str, near: f32, far: f32) -> Result<(), ConfigError> {
    if !(near > 0.0 && far > near) {
        return Err(ConfigError::Invalid(format!(
            "{section} clip range requires 0 < near < far (got {near}..{far})"
        )));
    }
    Ok(())
}

/// A view direction and up vector must span a plane, or the derived axes are NaN
fn check_basis(section: &str, direction: Vec3, up: [f32; 3]) -> Result<(), ConfigError> {
    let up = Vec3::from(up);
    if !up.iter().all(|c| c.is_finite()) || up.norm() < BASIS_EPSILON {
        return Err(ConfigError::Invalid(format!(
            "{section} up vector {up:?} must be finite and non-zero"
        )));
    }

    if !direction.iter().all(|c| c.is_finite()) || direction.norm() < BASIS_EPSILON {
        return Err(ConfigError::Invalid(format!("{section} view direction is degenerate")));
    }

    if direction.normalize().cross(&up.normalize()).norm() < BASIS_EPSILON {
        return Err(ConfigError::Invalid(format!(
            "{section} up vector is parallel to the view direction"
        )));
    }

    Ok(())
}

impl Config for ViewerConfig {}
