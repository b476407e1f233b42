//! Building blocks shared by the room tables

use crate::exhibit::{ExhibitAnimator, Placement};
use museum_engine::assets::{AssetLoader, ExternalModel, Model};
use museum_engine::foundation::collections::TextureHandle;
use museum_engine::foundation::math::{Axis3, Mat4, Vec3};
use museum_engine::render::{DrawModels, RenderResult, Renderer, Surface};

/// Flat quad every wall, floor and ceiling panel is cut from
pub const CARPET_MODEL: &str = "model/carpet.obj";
/// Ceiling spotlight fixture
pub const SPOTLIGHT_MODEL: &str = "model/spotlight.glb";
/// Glass display case
pub const SHOWCASE_MODEL: &str = "model/glass_showcase.glb";

/// Texture names registered by the scene
pub const FLOOR_TEXTURE: &str = "floor";
/// Wall and ceiling texture name
pub const WALL_TEXTURE: &str = "wall";
/// Fallback texture for the fossil skeleton
pub const BONES_TEXTURE: &str = "bones";
/// Flashlight body texture
pub const FLASHLIGHT_TEXTURE: &str = "flashlight";

/// Colour used for panels whose texture failed to load
pub const PANEL_FALLBACK_COLOR: [f32; 3] = [0.6, 0.55, 0.5];

/// Which texture a panel uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTexture {
    /// Floor tiles
    Floor,
    /// Wood wall panelling
    Wall,
}

/// One quad of static architecture
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Placement of the carpet quad
    pub placement: Placement,
    /// Texture
    pub texture: PanelTexture,
}

impl Panel {
    /// Floor panel
    pub fn floor(placement: Placement) -> Self {
        Self {
            placement,
            texture: PanelTexture::Floor,
        }
    }

    /// Wall or ceiling panel
    pub fn wall(placement: Placement) -> Self {
        Self {
            placement,
            texture: PanelTexture::Wall,
        }
    }
}

/// Models and textures every room draws with
#[derive(Debug, Clone)]
pub struct SharedModels {
    /// Panel quad
    pub carpet: Model,
    /// Spotlight fixture
    pub spotlight: ExternalModel,
    /// Glass display case
    pub showcase: ExternalModel,
    /// Floor texture
    pub floor: Option<TextureHandle>,
    /// Wall texture
    pub wall: Option<TextureHandle>,
    /// Fossil fallback texture
    pub bones: Option<TextureHandle>,
}

impl SharedModels {
    /// Load the shared models; textures must already be registered
    pub fn load(assets: &mut dyn AssetLoader) -> Self {
        Self {
            carpet: assets.load_model_planar(CARPET_MODEL),
            spotlight: assets.load_external_model(SPOTLIGHT_MODEL),
            showcase: assets.load_external_model(SHOWCASE_MODEL),
            floor: assets.texture(FLOOR_TEXTURE),
            wall: assets.texture(WALL_TEXTURE),
            bones: assets.texture(BONES_TEXTURE),
        }
    }

    /// Draw architecture panels
    pub fn draw_panels(&self, renderer: &mut dyn Renderer, panels: &[Panel]) -> RenderResult<()> {
        for panel in panels {
            let texture = match panel.texture {
                PanelTexture::Floor => self.floor,
                PanelTexture::Wall => self.wall,
            };
            let surface = textured_or_fallback(renderer, texture);
            renderer.draw_model(&self.carpet, &panel.placement.matrix(), surface)?;
        }
        Ok(())
    }
}

fn textured_or_fallback(renderer: &mut dyn Renderer, texture: Option<TextureHandle>) -> Surface {
    match texture {
        Some(texture) => {
            renderer.bind_texture(texture);
            Surface::Texture(texture)
        }
        None => {
            let [r, g, b] = PANEL_FALLBACK_COLOR;
            Surface::Color(Vec3::new(r, g, b))
        }
    }
}

/// A placed model, optionally floating
#[derive(Debug, Clone)]
pub struct Exhibit {
    /// Identity used by zones and inspection
    pub id: &'static str,
    /// Loaded model
    pub model: ExternalModel,
    /// Resting placement
    pub placement: Placement,
    /// Used when the model carries no texture of its own
    pub fallback_texture: Option<TextureHandle>,
    /// Float animation, for exhibits that can float
    pub animator: Option<ExhibitAnimator>,
}

impl Exhibit {
    /// Static exhibit loaded from `path`
    pub fn load(assets: &mut dyn AssetLoader, id: &'static str, path: &str, placement: Placement) -> Self {
        Self {
            id,
            model: assets.load_external_model(path),
            placement,
            fallback_texture: None,
            animator: None,
        }
    }

    /// Give the exhibit a float animation
    #[must_use]
    pub fn floating(mut self, animator: ExhibitAnimator) -> Self {
        self.animator = Some(animator);
        self
    }

    /// Texture to use when the model has none
    #[must_use]
    pub fn with_fallback_texture(mut self, texture: Option<TextureHandle>) -> Self {
        self.fallback_texture = texture;
        self
    }

    /// Current float offset
    pub fn offset(&self) -> f32 {
        self.animator.as_ref().map_or(0.0, ExhibitAnimator::current_offset)
    }

    /// Start or stop floating; returns the new state, `None` for static exhibits
    pub fn toggle_float(&mut self) -> Option<bool> {
        let animator = self.animator.as_mut()?;
        animator.toggle();
        Some(animator.is_animating())
    }

    /// Advance the float animation
    pub fn advance(&mut self, delta_time: f32) {
        if let Some(animator) = self.animator.as_mut() {
            animator.advance(delta_time);
        }
    }

    /// World matrix including the float offset
    pub fn matrix(&self) -> Mat4 {
        self.placement.raised(self.offset())
    }

    /// Draw at the current float offset
    pub fn draw(&self, renderer: &mut dyn Renderer) -> RenderResult<()> {
        self.draw_with_pivot(renderer, &Mat4::identity())
    }

    /// Draw with an extra rotation applied about the exhibit position
    pub fn draw_with_pivot(&self, renderer: &mut dyn Renderer, pivot: &Mat4) -> RenderResult<()> {
        let transform = self.placement.matrix_with(self.offset(), pivot);
        match (self.model.texture, self.fallback_texture) {
            (None, Some(texture)) if self.model.is_renderable() => {
                renderer.bind_texture(texture);
                renderer.draw(self.model.id, &transform, Surface::Texture(texture))
            }
            _ => renderer.draw_external(&self.model, &transform),
        }
    }

    /// Resting position of the exhibit
    pub fn position(&self) -> Vec3 {
        self.placement.translation
    }
}

/// Ceiling spotlight that latches on once lit
#[derive(Debug, Clone, PartialEq)]
pub struct Spotlight {
    /// Where the fixture model hangs
    pub fixture: Placement,
    /// Where the light is emitted
    pub light: Vec3,
    lit: bool,
}

impl Spotlight {
    /// Unlit spotlight hanging above (x, z); the fixture points down
    pub fn hanging(x: f32, z: f32, fixture_height: f32, light_height: f32) -> Self {
        Self {
            fixture: Placement::at(x, fixture_height, z)
                .rotate(Axis3::X, 180.0)
                .scaled(3.0),
            light: Vec3::new(x, light_height, z),
            lit: false,
        }
    }

    /// Switch on; stays on for the rest of the session
    pub fn light_up(&mut self) -> bool {
        let changed = !self.lit;
        self.lit = true;
        changed
    }

    /// Whether the light is on
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Draw the fixture when lit
    pub fn draw(&self, renderer: &mut dyn Renderer, models: &SharedModels) -> RenderResult<()> {
        if self.lit {
            renderer.draw_external(&models.spotlight, &self.fixture.matrix())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use museum_engine::render::{RecordingRenderer, RenderPass};

    #[test]
    fn test_spotlight_latches() {
        let mut spot = Spotlight::hanging(-17.0, -7.0, 20.0, 18.0);
        assert!(!spot.is_lit());
        assert!(spot.light_up());
        assert!(!spot.light_up());
        assert!(spot.is_lit());
        assert_eq!(spot.light, Vec3::new(-17.0, 18.0, -7.0));
    }

    #[test]
    fn test_exhibit_float_toggle() {
        let mut exhibit = Exhibit {
            id: "coffin",
            model: ExternalModel::missing("model/egyptian_coffin.glb"),
            placement: Placement::at(-17.0, 2.5, 26.5),
            fallback_texture: None,
            animator: None,
        };
        assert_eq!(exhibit.toggle_float(), None);

        exhibit = exhibit.floating(ExhibitAnimator::new(0.3, 2.0));
        assert_eq!(exhibit.toggle_float(), Some(true));
        exhibit.advance(0.5);
        assert!(exhibit.offset() > 0.0);
    }

    #[test]
    fn test_missing_models_draw_nothing() {
        let models = SharedModels {
            carpet: Model::missing(CARPET_MODEL),
            spotlight: ExternalModel::missing(SPOTLIGHT_MODEL),
            showcase: ExternalModel::missing(SHOWCASE_MODEL),
            floor: None,
            wall: None,
            bones: None,
        };
        let mut renderer = RecordingRenderer::new();
        renderer
            .begin_frame(Vec3::zeros(), &Mat4::identity(), &Mat4::identity())
            .unwrap();
        models
            .draw_panels(&mut renderer, &[Panel::floor(Placement::at(0.0, 0.0, 0.0))])
            .unwrap();
        let mut spot = Spotlight::hanging(0.0, 0.0, 20.0, 18.0);
        spot.light_up();
        spot.draw(&mut renderer, &models).unwrap();
        renderer.end_frame().unwrap();

        assert!(renderer.draws_in(RenderPass::World).is_empty());
    }
}
