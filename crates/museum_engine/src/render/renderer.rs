//! Backend-facing rendering interface
//!
//! Game code never talks to a graphics API directly. Each frame it opens a
//! frame on a [`Renderer`], uploads the lighting state, and issues draws in
//! three passes: the world, the viewmodel held in front of the camera, and
//! the screen-space overlay.

use crate::assets::{ExternalModel, Model, ModelWithMaterial};
use crate::foundation::collections::{ModelId, TextureHandle};
use crate::foundation::math::{Mat4, Vec3};
use crate::render::lighting::LightingFrame;
use std::ops::Range;
use thiserror::Error;

/// High-level rendering error types
///
/// Backend failures are reported through these variants without exposing
/// graphics API types to the game.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Renderer initialization failed during setup
    #[error("Renderer initialization failed: {0}")]
    InitializationFailed(String),

    /// A rendering operation failed during execution
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    /// A draw was issued outside `begin_frame`/`end_frame`
    #[error("No frame in progress")]
    NoFrameInProgress,

    /// Backend-specific error occurred
    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;

/// How a draw is shaded
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    /// Sample a texture
    Texture(TextureHandle),
    /// Flat colour
    Color(Vec3),
}

/// Draw pass; each pass is drawn over the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderPass {
    /// Lit world geometry
    #[default]
    World,
    /// Camera-relative geometry drawn after the world with depth cleared
    Viewmodel,
    /// Screen-space geometry with an orthographic projection and no lighting
    Overlay,
}

/// Draw target implemented by graphics backends
pub trait Renderer {
    /// Clear the frame and set the camera matrices
    fn begin_frame(&mut self, clear_color: Vec3, view: &Mat4, projection: &Mat4) -> RenderResult<()>;

    /// Switch pass for subsequent draws
    fn set_pass(&mut self, pass: RenderPass);

    /// Upload the lights for this frame
    fn set_lighting(&mut self, lighting: &LightingFrame);

    /// Bind a texture for subsequent textured draws
    fn bind_texture(&mut self, texture: TextureHandle);

    /// Draw a whole model
    fn draw(&mut self, model: ModelId, transform: &Mat4, surface: Surface) -> RenderResult<()>;

    /// Draw a vertex range of a triangle-list model
    fn draw_range(
        &mut self,
        model: ModelId,
        vertices: Range<u32>,
        transform: &Mat4,
        surface: Surface,
    ) -> RenderResult<()>;

    /// Present the frame
    fn end_frame(&mut self) -> RenderResult<()>;
}

/// Model-level drawing on top of [`Renderer`]
///
/// Every method skips models with a zero vertex or index count, so a failed
/// load draws nothing instead of failing the frame.
pub trait DrawModels: Renderer {
    /// Draw a triangle-list model with one surface
    fn draw_model(&mut self, model: &Model, transform: &Mat4, surface: Surface) -> RenderResult<()> {
        if !model.is_renderable() {
            return Ok(());
        }
        self.draw(model.id, transform, surface)
    }

    /// Draw a glTF model with its embedded texture, or its base colour
    fn draw_external(&mut self, model: &ExternalModel, transform: &Mat4) -> RenderResult<()> {
        if !model.is_renderable() {
            return Ok(());
        }
        let surface = match model.texture {
            Some(texture) => {
                self.bind_texture(texture);
                Surface::Texture(texture)
            }
            None => Surface::Color(model.base_color),
        };
        self.draw(model.id, transform, surface)
    }

    /// Draw a material model run by run
    ///
    /// Runs with a diffuse texture use it; the rest fall back to `fallback`
    /// when given, then to the material's diffuse colour.
    fn draw_with_materials(
        &mut self,
        model: &ModelWithMaterial,
        transform: &Mat4,
        fallback: Option<TextureHandle>,
    ) -> RenderResult<()> {
        if !model.is_renderable() {
            return Ok(());
        }
        for run in model.material_runs() {
            let material = model.material(run.material);
            let texture = material.and_then(|m| m.texture).or(fallback);
            let surface = match texture {
                Some(texture) => {
                    self.bind_texture(texture);
                    Surface::Texture(texture)
                }
                None => {
                    let [r, g, b] = crate::assets::DEFAULT_BASE_COLOR;
                    Surface::Color(material.map_or_else(|| Vec3::new(r, g, b), |m| m.diffuse))
                }
            };
            self.draw_range(model.id, run.vertices, transform, surface)?;
        }
        Ok(())
    }
}

impl<R: Renderer + ?Sized> DrawModels for R {}
