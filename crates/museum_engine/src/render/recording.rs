//! Command-recording renderers
//!
//! [`RecordingRenderer`] keeps every command of the last frame so tests can
//! assert on what a scene drew. [`StatsRenderer`] only counts draws per pass
//! and logs a summary at a fixed frame interval; the windowed binary uses it
//! while no GPU backend is attached.

use crate::foundation::collections::{ModelId, TextureHandle};
use crate::foundation::math::{Mat4, Vec3};
use crate::render::lighting::LightingFrame;
use crate::render::renderer::{RenderError, RenderPass, RenderResult, Renderer, Surface};
use std::ops::Range;

/// A single command as received by the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Frame start
    BeginFrame {
        /// Clear colour
        clear_color: Vec3,
        /// Camera view matrix
        view: Mat4,
        /// Camera projection matrix
        projection: Mat4,
    },
    /// Pass switch
    SetPass(RenderPass),
    /// Lighting upload
    SetLighting(LightingFrame),
    /// Texture bind
    BindTexture(TextureHandle),
    /// Draw call
    Draw {
        /// Pass active at the time of the draw
        pass: RenderPass,
        /// Model drawn
        model: ModelId,
        /// Vertex range, `None` for the whole model
        vertices: Option<Range<u32>>,
        /// Model transform
        transform: Mat4,
        /// Shading
        surface: Surface,
    },
    /// Frame end
    EndFrame,
}

/// Renderer that stores the commands of the current and previous frame
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    current: Vec<RenderCommand>,
    last_frame: Vec<RenderCommand>,
    pass: RenderPass,
    in_frame: bool,
    frames: u64,
}

impl RecordingRenderer {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands of the last completed frame
    pub fn last_frame(&self) -> &[RenderCommand] {
        &self.last_frame
    }

    /// Number of completed frames
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draw commands of the last frame issued in `pass`
    pub fn draws_in(&self, pass: RenderPass) -> Vec<&RenderCommand> {
        self.last_frame
            .iter()
            .filter(|cmd| matches!(cmd, RenderCommand::Draw { pass: p, .. } if *p == pass))
            .collect()
    }

    /// Lighting uploaded during the last frame
    pub fn last_lighting(&self) -> Option<&LightingFrame> {
        self.last_frame.iter().rev().find_map(|cmd| match cmd {
            RenderCommand::SetLighting(lighting) => Some(lighting),
            _ => None,
        })
    }

    /// Whether `model` was drawn during the last frame
    pub fn drew(&self, model: ModelId) -> bool {
        self.last_frame
            .iter()
            .any(|cmd| matches!(cmd, RenderCommand::Draw { model: m, .. } if *m == model))
    }

    fn record_draw(
        &mut self,
        model: ModelId,
        vertices: Option<Range<u32>>,
        transform: &Mat4,
        surface: Surface,
    ) -> RenderResult<()> {
        if !self.in_frame {
            return Err(RenderError::NoFrameInProgress);
        }
        self.current.push(RenderCommand::Draw {
            pass: self.pass,
            model,
            vertices,
            transform: *transform,
            surface,
        });
        Ok(())
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self, clear_color: Vec3, view: &Mat4, projection: &Mat4) -> RenderResult<()> {
        self.current.clear();
        self.pass = RenderPass::World;
        self.in_frame = true;
        self.current.push(RenderCommand::BeginFrame {
            clear_color,
            view: *view,
            projection: *projection,
        });
        Ok(())
    }

    fn set_pass(&mut self, pass: RenderPass) {
        self.pass = pass;
        self.current.push(RenderCommand::SetPass(pass));
    }

    fn set_lighting(&mut self, lighting: &LightingFrame) {
        self.current.push(RenderCommand::SetLighting(lighting.clone()));
    }

    fn bind_texture(&mut self, texture: TextureHandle) {
        self.current.push(RenderCommand::BindTexture(texture));
    }

    fn draw(&mut self, model: ModelId, transform: &Mat4, surface: Surface) -> RenderResult<()> {
        self.record_draw(model, None, transform, surface)
    }

    fn draw_range(
        &mut self,
        model: ModelId,
        vertices: Range<u32>,
        transform: &Mat4,
        surface: Surface,
    ) -> RenderResult<()> {
        self.record_draw(model, Some(vertices), transform, surface)
    }

    fn end_frame(&mut self) -> RenderResult<()> {
        if !self.in_frame {
            return Err(RenderError::NoFrameInProgress);
        }
        self.current.push(RenderCommand::EndFrame);
        self.last_frame = std::mem::take(&mut self.current);
        self.in_frame = false;
        self.frames += 1;
        Ok(())
    }
}

/// Draw counts of one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Draws in the world pass
    pub world_draws: u32,
    /// Draws in the viewmodel pass
    pub viewmodel_draws: u32,
    /// Draws in the overlay pass
    pub overlay_draws: u32,
    /// Lights uploaded
    pub lights: usize,
}

/// Renderer that counts draws and logs them periodically
#[derive(Debug)]
pub struct StatsRenderer {
    pass: RenderPass,
    current: FrameStats,
    last: FrameStats,
    frames: u64,
    log_interval: u64,
}

impl StatsRenderer {
    /// Log a summary every `log_interval` frames
    pub fn new(log_interval: u64) -> Self {
        Self {
            pass: RenderPass::World,
            current: FrameStats::default(),
            last: FrameStats::default(),
            frames: 0,
            log_interval: log_interval.max(1),
        }
    }

    /// Counts of the last completed frame
    pub fn last_frame(&self) -> FrameStats {
        self.last
    }

    fn count(&mut self) {
        match self.pass {
            RenderPass::World => self.current.world_draws += 1,
            RenderPass::Viewmodel => self.current.viewmodel_draws += 1,
            RenderPass::Overlay => self.current.overlay_draws += 1,
        }
    }
}

impl Renderer for StatsRenderer {
    fn begin_frame(&mut self, _clear_color: Vec3, _view: &Mat4, _projection: &Mat4) -> RenderResult<()> {
        self.pass = RenderPass::World;
        self.current = FrameStats::default();
        Ok(())
    }

    fn set_pass(&mut self, pass: RenderPass) {
        self.pass = pass;
    }

    fn set_lighting(&mut self, lighting: &LightingFrame) {
        self.current.lights = lighting.lights.len();
    }

    fn bind_texture(&mut self, _texture: TextureHandle) {}

    fn draw(&mut self, _model: ModelId, _transform: &Mat4, _surface: Surface) -> RenderResult<()> {
        self.count();
        Ok(())
    }

    fn draw_range(
        &mut self,
        _model: ModelId,
        _vertices: Range<u32>,
        _transform: &Mat4,
        _surface: Surface,
    ) -> RenderResult<()> {
        self.count();
        Ok(())
    }

    fn end_frame(&mut self) -> RenderResult<()> {
        self.last = self.current;
        self.frames += 1;
        if self.frames % self.log_interval == 0 {
            log::debug!(
                "Frame {}: {} world, {} viewmodel, {} overlay draws, {} lights",
                self.frames,
                self.last.world_draws,
                self.last.viewmodel_draws,
                self.last.overlay_draws,
                self.last.lights
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ExternalModel, Model, ModelWithMaterial, MaterialInfo};
    use crate::foundation::collections::HandleMap;
    use crate::render::renderer::DrawModels;
    use std::collections::HashMap;

    fn ids() -> (ModelId, ModelId) {
        let mut map: HandleMap<ModelId, ()> = HandleMap::with_key();
        (map.insert(()), map.insert(()))
    }

    #[test]
    fn test_draw_outside_frame_fails() {
        let mut renderer = RecordingRenderer::new();
        let (id, _) = ids();
        let result = renderer.draw(id, &Mat4::identity(), Surface::Color(Vec3::zeros()));
        assert!(matches!(result, Err(RenderError::NoFrameInProgress)));
    }

    #[test]
    fn test_sentinel_models_are_skipped() {
        let mut renderer = RecordingRenderer::new();
        renderer
            .begin_frame(Vec3::zeros(), &Mat4::identity(), &Mat4::identity())
            .unwrap();
        renderer
            .draw_model(&Model::missing("carpet.obj"), &Mat4::identity(), Surface::Color(Vec3::zeros()))
            .unwrap();
        renderer
            .draw_external(&ExternalModel::missing("skull.glb"), &Mat4::identity())
            .unwrap();
        renderer
            .draw_with_materials(&ModelWithMaterial::missing("Linterna.obj"), &Mat4::identity(), None)
            .unwrap();
        renderer.end_frame().unwrap();

        assert!(renderer.draws_in(RenderPass::World).is_empty());
    }

    #[test]
    fn test_draws_are_tagged_with_pass() {
        let mut renderer = RecordingRenderer::new();
        let (world, overlay) = ids();
        renderer
            .begin_frame(Vec3::zeros(), &Mat4::identity(), &Mat4::identity())
            .unwrap();
        renderer.draw(world, &Mat4::identity(), Surface::Color(Vec3::x())).unwrap();
        renderer.set_pass(RenderPass::Overlay);
        renderer.draw(overlay, &Mat4::identity(), Surface::Color(Vec3::y())).unwrap();
        renderer.end_frame().unwrap();

        assert_eq!(renderer.draws_in(RenderPass::World).len(), 1);
        assert_eq!(renderer.draws_in(RenderPass::Overlay).len(), 1);
        assert!(renderer.drew(world));
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn test_material_runs_become_range_draws() {
        let (id, _) = ids();
        let mut materials = HashMap::new();
        materials.insert(
            "lens".to_string(),
            MaterialInfo {
                name: "lens".to_string(),
                diffuse: Vec3::new(0.9, 0.9, 0.5),
                texture: None,
            },
        );
        let model = ModelWithMaterial {
            id,
            name: "flashlight".to_string(),
            vertex_count: 9,
            face_materials: vec!["body".into(), "body".into(), "lens".into()],
            materials,
        };

        let mut renderer = RecordingRenderer::new();
        renderer
            .begin_frame(Vec3::zeros(), &Mat4::identity(), &Mat4::identity())
            .unwrap();
        renderer.draw_with_materials(&model, &Mat4::identity(), None).unwrap();
        renderer.end_frame().unwrap();

        let draws = renderer.draws_in(RenderPass::World);
        assert_eq!(draws.len(), 2);
        match draws[1] {
            RenderCommand::Draw { vertices, surface, .. } => {
                assert_eq!(vertices.clone(), Some(6..9));
                assert_eq!(*surface, Surface::Color(Vec3::new(0.9, 0.9, 0.5)));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_stats_renderer_counts_per_pass() {
        let (id, _) = ids();
        let mut renderer = StatsRenderer::new(60);
        renderer
            .begin_frame(Vec3::zeros(), &Mat4::identity(), &Mat4::identity())
            .unwrap();
        renderer.draw(id, &Mat4::identity(), Surface::Color(Vec3::zeros())).unwrap();
        renderer.set_pass(RenderPass::Viewmodel);
        renderer.draw(id, &Mat4::identity(), Surface::Color(Vec3::zeros())).unwrap();
        renderer.end_frame().unwrap();

        let stats = renderer.last_frame();
        assert_eq!(stats.world_draws, 1);
        assert_eq!(stats.viewmodel_draws, 1);
        assert_eq!(stats.overlay_draws, 0);
    }
}
