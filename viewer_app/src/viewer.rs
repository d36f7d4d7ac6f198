//! Headless orbit demo
//!
//! A sun with an orbiting planet and a moon around the planet. Input is
//! scripted so the run is reproducible without a window.

use std::fmt::Debug;
use std::time::Duration;

use scene_engine::config::ConfigError;
use scene_engine::core::config::ViewerConfig;
use scene_engine::foundation::math::Vec3;
use scene_engine::foundation::time::{Stopwatch, Timer};
use scene_engine::input::{CameraController, KeyCode};
use scene_engine::render::{
    BackendResult, Camera, CameraUniforms, FrameSubmitter, LightUniforms, ObjectUniforms,
    Projection, RenderBackend, RenderError, ShadowLight,
};
use scene_engine::scene::{NodeId, SceneGraph};
use thiserror::Error;

/// Frames run when the configuration sets no limit
pub const DEFAULT_FRAMES: u64 = 240;

/// Degrees per second the sun turns, carrying the planet around it
const SUN_SPIN: f32 = 20.0;
/// Degrees per second the planet turns, carrying the moon around it
const PLANET_SPIN: f32 = 90.0;
/// Degrees per second the moon turns about its own axis
const MOON_SPIN: f32 = 45.0;

/// Viewer failures
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The backend rejected a frame
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// A scene node disappeared while the viewer held its id
    #[error("Scene node missing: {0}")]
    MissingNode(&'static str),
}

/// Mesh reference carried by each node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshRef(pub &'static str);

/// Backend that logs every draw instead of rasterizing
#[derive(Debug, Default)]
pub struct LoggingBackend {
    frame: u64,
    frame_draws: usize,
    total_draws: usize,
}

impl LoggingBackend {
    /// Draws issued over the backend's lifetime
    pub fn total_draws(&self) -> usize {
        self.total_draws
    }
}

impl<P: Debug> RenderBackend<P> for LoggingBackend {
    fn begin_frame(&mut self, camera: &CameraUniforms) -> BackendResult<()> {
        self.frame_draws = 0;
        log::trace!("Frame {} camera at {:?}", self.frame, &camera.position[..3]);
        Ok(())
    }

    fn set_shadow_light(&mut self, light: &LightUniforms) -> BackendResult<()> {
        log::trace!("Frame {} shadow light at {:?}", self.frame, &light.position[..3]);
        Ok(())
    }

    fn draw(&mut self, object: &ObjectUniforms, payload: &P) -> BackendResult<()> {
        let translation = &object.model[3][..3];
        log::debug!("Frame {} draw {:?} at {:?}", self.frame, payload, translation);
        self.frame_draws += 1;
        self.total_draws += 1;
        Ok(())
    }

    fn end_frame(&mut self) -> BackendResult<()> {
        log::trace!("Frame {} finished with {} draws", self.frame, self.frame_draws);
        self.frame += 1;
        Ok(())
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy)]
pub struct RunReport {
    /// Frames rendered
    pub frames: u64,
    /// Draws submitted across all frames
    pub draws: usize,
    /// World matrices recomputed across all frames
    pub recomputed: usize,
    /// Average frames per second
    pub average_fps: f32,
}

struct OrbitScene {
    graph: SceneGraph<MeshRef>,
    sun: NodeId,
    planet: NodeId,
    moon: NodeId,
}

impl OrbitScene {
    fn build() -> Result<Self, ViewerError> {
        let mut graph = SceneGraph::new();
        let sun = graph.create_root(MeshRef("sun"));
        let planet = graph
            .add_child(sun, MeshRef("planet"))
            .ok_or(ViewerError::MissingNode("sun"))?;
        let moon = graph
            .add_child(planet, MeshRef("moon"))
            .ok_or(ViewerError::MissingNode("planet"))?;

        let mut scene = Self { graph, sun, planet, moon };
        scene.transform(scene.planet, "planet")?.set_position(Vec3::new(6.0, 0.0, 0.0));
        let moon_transform = scene.transform(scene.moon, "moon")?;
        moon_transform.set_position(Vec3::new(1.5, 0.0, 0.0));
        moon_transform.set_scale(Vec3::new(0.3, 0.3, 0.3));

        log::info!("Built orbit scene with {} nodes", scene.graph.len());
        Ok(scene)
    }

    fn transform(
        &mut self,
        id: NodeId,
        name: &'static str,
    ) -> Result<&mut scene_engine::scene::Transform, ViewerError> {
        self.graph.transform_mut(id).ok_or(ViewerError::MissingNode(name))
    }

    fn animate(&mut self, total_time: f32) -> Result<(), ViewerError> {
        let sun_spin = Vec3::new(0.0, SUN_SPIN * total_time, 0.0);
        let planet_spin = Vec3::new(0.0, PLANET_SPIN * total_time, 0.0);
        let moon_spin = Vec3::new(MOON_SPIN * total_time, 0.0, 0.0);

        let (sun, planet, moon) = (self.sun, self.planet, self.moon);
        self.transform(sun, "sun")?.set_rotation(sun_spin);
        self.transform(planet, "planet")?.set_rotation(planet_spin);
        self.transform(moon, "moon")?.set_rotation(moon_spin);
        Ok(())
    }
}

/// Feed the controller a short scripted input sequence
fn script_input(controller: &mut CameraController, frame: u64) {
    match frame {
        0 => controller.press(KeyCode::S),
        60 => {
            controller.release(KeyCode::S);
            controller.press(KeyCode::D);
        }
        120 => controller.release(KeyCode::D),
        _ => {}
    }

    // Slow sweep to the right with a slight downward drift
    let t = frame as f64;
    controller.cursor_moved(400.0 + t * 2.0, 300.0 + t * 0.5);
}

/// Headless viewer
pub struct Viewer {
    config: ViewerConfig,
    scene: OrbitScene,
    camera: Camera,
    projection: Projection,
    light: ShadowLight,
    controller: CameraController,
    timer: Timer,
    fixed_step: Option<Duration>,
}

impl Viewer {
    /// Build the demo scene from a validated configuration
    pub fn new(config: ViewerConfig) -> Result<Self, ViewerError> {
        config.validate()?;

        let camera = Camera::from_config(&config.camera);
        let projection = Projection::from_config(&config.projection, config.engine.aspect_ratio());
        let light = ShadowLight::from_config(&config.light);

        Ok(Self {
            scene: OrbitScene::build()?,
            camera,
            projection,
            light,
            controller: CameraController::new(),
            timer: Timer::new(),
            fixed_step: None,
            config,
        })
    }

    /// Advance by `step` every frame instead of reading the wall clock
    pub fn with_fixed_step(mut self, step: Duration) -> Self {
        self.fixed_step = Some(step);
        self
    }

    /// Run the configured number of frames against `backend`
    ///
    /// Stops early when the controller reports a quit request.
    pub fn run<B>(&mut self, backend: &mut B) -> Result<RunReport, ViewerError>
    where
        B: RenderBackend<MeshRef>,
    {
        let frames = self.config.engine.max_frames.unwrap_or(DEFAULT_FRAMES);
        log::info!("Running {} frames", frames);

        let mut draws = 0;
        let mut recomputed = 0;
        let mut walk_time = Stopwatch::new();

        for frame in 0..frames {
            if self.controller.quit_requested() {
                log::info!("Stopping at frame {} on quit request", frame);
                break;
            }

            let delta_time = match self.fixed_step {
                Some(step) => self.timer.advance(step),
                None => self.timer.tick(),
            };

            script_input(&mut self.controller, frame);
            self.controller.apply(&mut self.camera, delta_time);
            self.scene.animate(self.timer.total_time())?;

            walk_time.start();
            let stats = self.scene.graph.update_self_and_children(self.scene.sun);
            walk_time.stop();
            recomputed += stats.recomputed;

            draws += FrameSubmitter::new(&self.camera, &self.projection)
                .with_shadow_light(&self.light)
                .submit(&self.scene.graph, self.scene.graph.roots(), backend)?;

            if self.timer.fps() > 0 && frame % 60 == 0 {
                log::debug!("Frame {}: {} FPS", frame, self.timer.fps());
            }
        }

        let report = RunReport {
            frames: self.timer.frame_count(),
            draws,
            recomputed,
            average_fps: self.timer.average_fps(),
        };
        log::info!(
            "Finished {} frames ({} draws), average {:.1} FPS, {:.3} ms spent walking",
            report.frames,
            report.draws,
            report.average_fps,
            walk_time.elapsed_millis()
        );
        log::info!(
            "Camera ended at {:?} (yaw {:.1}, pitch {:.1})",
            self.camera.position(),
            self.camera.yaw(),
            self.camera.pitch()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use scene_engine::render::RecordingBackend;

    const STEP: Duration = Duration::from_millis(100);

    fn short_config(frames: u64) -> ViewerConfig {
        let mut config = ViewerConfig::default();
        config.engine.max_frames = Some(frames);
        config
    }

    #[test]
    fn test_run_draws_every_node_each_frame() {
        let mut viewer = Viewer::new(short_config(5)).unwrap();
        let mut backend = LoggingBackend::default();

        let report = viewer.run(&mut backend).unwrap();

        assert_eq!(report.frames, 5);
        assert_eq!(report.draws, 15);
        assert_eq!(backend.total_draws(), 15);
    }

    #[test]
    fn test_draw_order_is_sun_planet_moon() {
        let mut viewer = Viewer::new(short_config(1)).unwrap();
        let mut backend = RecordingBackend::new();

        viewer.run(&mut backend).unwrap();

        assert_eq!(
            backend.drawn_payloads(),
            vec![&MeshRef("sun"), &MeshRef("planet"), &MeshRef("moon")]
        );
    }

    #[test]
    fn test_scripted_input_moves_camera_back() {
        let mut viewer = Viewer::new(short_config(3)).unwrap().with_fixed_step(STEP);

        viewer.run(&mut LoggingBackend::default()).unwrap();

        // S held for three 0.1 s frames at 5 units/s; the look drift only
        // turns the camera by a fraction of a degree
        let position = viewer.camera.position();
        assert!(position.z > 0.0);
        assert_relative_eq!(position.z, 1.5, epsilon = 1e-3);
        assert_relative_eq!(viewer.camera.yaw(), -90.4, epsilon = 1e-4);
    }

    #[test]
    fn test_fixed_step_drives_animation() {
        let mut viewer = Viewer::new(short_config(10)).unwrap().with_fixed_step(STEP);

        viewer.run(&mut LoggingBackend::default()).unwrap();

        assert_relative_eq!(viewer.timer.total_time(), 1.0, epsilon = 1e-5);
        let sun = viewer.scene.graph.transform(viewer.scene.sun).unwrap();
        assert_relative_eq!(sun.rotation().y, SUN_SPIN, epsilon = 1e-3);
    }

    #[test]
    fn test_escape_stops_the_run() {
        let mut viewer = Viewer::new(short_config(5)).unwrap().with_fixed_step(STEP);
        viewer.controller.press(KeyCode::Escape);

        let report = viewer.run(&mut LoggingBackend::default()).unwrap();

        assert_eq!(report.frames, 0);
        assert_eq!(report.draws, 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ViewerConfig::default();
        config.projection.near = 0.0;

        let result = Viewer::new(config);
        assert!(matches!(result, Err(ViewerError::Config(ConfigError::Invalid(_)))));
    }
}
