//! # Scene Engine
//!
//! Scene-graph transforms and a free-look camera for a 3D viewer.
//!
//! ## Features
//!
//! - **Scene Graph**: arena-backed node hierarchy with lazily propagated world matrices
//! - **Camera**: yaw/pitch first-person camera with an always-current view matrix
//! - **Render Boundary**: `Pod` uniform blocks handed to a pluggable backend
//! - **Configuration**: TOML or RON viewer settings
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_engine::prelude::*;
//!
//! let mut graph = SceneGraph::new();
//! let sun = graph.create_root("sun");
//! let planet = graph.add_child(sun, "planet").expect("sun is alive");
//! graph.transform_mut(planet).expect("planet is alive").set_position(Vec3::new(5.0, 0.0, 0.0));
//!
//! graph.update_self_and_children(sun);
//!
//! let camera = Camera::default();
//! let projection = Projection::perspective(45.0, 16.0 / 9.0, 0.1, 100.0);
//! let mut backend = RecordingBackend::new();
//! let draws = submit_frame(&graph, &[sun], &camera, &projection, None, &mut backend)?;
//! assert_eq!(draws, 2);
//! # Ok::<(), RenderError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod input;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        core::config::{CameraConfig, EngineConfig, LightConfig, ProjectionConfig, ViewerConfig},
        foundation::{
            math::{Mat4, Mat4Ext, Vec3},
            time::{Stopwatch, Timer},
        },
        input::{CameraController, KeyCode, MovementKeys},
        render::{
            submit_frame, Camera, CameraMovement, FrameSubmitter, LightColours, Projection,
            RecordingBackend, RenderBackend, RenderError, ShadowLight,
        },
        scene::{NodeId, SceneGraph, Transform, WalkStats},
    };
}
