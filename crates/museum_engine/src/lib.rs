//! # Museum Engine
//!
//! A small first-person engine: camera, collision predicates, asset loading,
//! lighting and a backend-agnostic renderer interface, driven by a
//! platform-polling main loop.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use museum_engine::prelude::*;
//!
//! struct Viewer {
//!     camera: Camera,
//! }
//!
//! impl Application for Viewer {
//!     fn update(&mut self, platform: &mut dyn Platform, delta_time: f32) -> Result<(), AppError> {
//!         if platform.is_key_down(KeyCode::W) {
//!             self.camera.process_keyboard(CameraMovement::Forward, delta_time, false);
//!         }
//!         Ok(())
//!     }
//!
//!     fn render(&mut self, renderer: &mut dyn Renderer) -> Result<(), AppError> {
//!         let projection = self.camera.projection_matrix(16.0 / 9.0, 0.1, 100.0);
//!         renderer.begin_frame(Vec3::zeros(), &self.camera.view_matrix(), &projection)?;
//!         renderer.end_frame()?;
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut viewer = Viewer { camera: Camera::default() };
//!     let mut platform = ScriptedPlatform::new(vec![ScriptedFrame::default(); 60]);
//!     let mut renderer = RecordingRenderer::new();
//!     run(&mut viewer, &mut platform, &mut renderer)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod foundation;
pub mod config;
pub mod assets;
pub mod render;
pub mod input;
pub mod physics;

mod application;

pub use application::{run, AppError, Application};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        run, AppError, Application,
        assets::{AssetLoader, ExternalModel, Model, ModelWithMaterial, ResourceManager, Vertex},
        config::{Config, ConfigError},
        foundation::{
            collections::{ModelId, TextureHandle},
            math::{Mat4, Mat4Ext, Vec2, Vec3},
            time::Timer,
        },
        input::{EdgeTrigger, InputSnapshot, KeyCode, MouseButton, Platform, ScriptedFrame, ScriptedPlatform},
        physics::{CollisionModel, Obstacle},
        render::{
            Camera, CameraMovement, DrawModels, Light, LightingFrame, RecordingRenderer, RenderPass,
            Renderer, Surface,
        },
    };
}
