//! # Rendering System
//!
//! Camera, lighting state and the backend-facing [`Renderer`] interface.
//! The scene describes each frame as a list of draws; backends decide how
//! to put them on screen.

pub mod camera;
pub mod lighting;
pub mod recording;
pub mod renderer;

pub use camera::{Camera, CameraMovement, CameraSettings};
pub use lighting::{Flashlight, Light, LightType, LightingFrame, LightingUniforms, MAX_LIGHTS};
pub use recording::{FrameStats, RecordingRenderer, RenderCommand, StatsRenderer};
pub use renderer::{DrawModels, RenderError, RenderPass, RenderResult, Renderer, Surface};
