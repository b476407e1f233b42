//! On-screen key prompts
//!
//! Glyphs are built from axis-aligned rectangles in normalised device
//! coordinates and drawn in the overlay pass with an identity projection.

use museum_engine::assets::{AssetLoader, Model, Vertex};
use museum_engine::foundation::math::{Mat4, Vec3};
use museum_engine::render::{DrawModels, RenderPass, RenderResult, Renderer, Surface};

const GLYPH_WIDTH: f32 = 0.04;
const GLYPH_HEIGHT: f32 = 0.06;
const STROKE: f32 = 0.01;

/// Which key the prompt shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKey {
    /// "E": interact
    Interact,
    /// "I": inspect
    Inspect,
}

/// Two triangles covering the rectangle with corner (x, y) and size (w, h)
fn push_rect(vertices: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32) {
    for [px, py] in [[x, y + h], [x, y], [x + w, y], [x, y + h], [x + w, y], [x + w, y + h]] {
        vertices.push(Vertex::at([px, py, 0.0]));
    }
}

/// Triangle list spelling "E"
pub fn letter_e() -> Vec<Vertex> {
    let (w, h, t) = (GLYPH_WIDTH, GLYPH_HEIGHT, STROKE);
    let mut vertices = Vec::with_capacity(24);
    push_rect(&mut vertices, -w / 2.0, -h / 2.0, t, h);
    push_rect(&mut vertices, -w / 2.0, h / 2.0 - t, w, t);
    push_rect(&mut vertices, -w / 2.0, -t / 2.0, w * 0.8, t);
    push_rect(&mut vertices, -w / 2.0, -h / 2.0, w, t);
    vertices
}

/// Triangle list spelling "I"
pub fn letter_i() -> Vec<Vertex> {
    let (w, h, t) = (GLYPH_WIDTH, GLYPH_HEIGHT, STROKE);
    let mut vertices = Vec::with_capacity(18);
    push_rect(&mut vertices, -t / 2.0, -h / 2.0, t, h);
    push_rect(&mut vertices, -w / 2.0, h / 2.0 - t, w, t);
    push_rect(&mut vertices, -w / 2.0, -h / 2.0, w, t);
    vertices
}

/// Prompt meshes and their screen placement
#[derive(Debug, Clone)]
pub struct Hud {
    interact: Model,
    inspect: Model,
    transform: Mat4,
    color: Vec3,
}

impl Hud {
    /// Register the glyph meshes
    pub fn new(assets: &mut dyn AssetLoader) -> Self {
        Self {
            interact: assets.register_mesh("hud/letter_e", letter_e()),
            inspect: assets.register_mesh("hud/letter_i", letter_i()),
            transform: Mat4::new_translation(&Vec3::new(0.0, -0.8, 0.0))
                * Mat4::new_nonuniform_scaling(&Vec3::new(0.8, 0.8, 1.0)),
            color: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Glyph mesh for a key
    pub fn glyph(&self, key: PromptKey) -> &Model {
        match key {
            PromptKey::Interact => &self.interact,
            PromptKey::Inspect => &self.inspect,
        }
    }

    /// Draw the prompt in the overlay pass
    pub fn draw(&self, renderer: &mut dyn Renderer, key: PromptKey) -> RenderResult<()> {
        renderer.set_pass(RenderPass::Overlay);
        renderer.draw_model(self.glyph(key), &self.transform, Surface::Color(self.color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_letter_e_has_four_bars() {
        let e = letter_e();
        assert_eq!(e.len(), 24);
        // top bar ends at the glyph's top edge
        let top = e[6..12].iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert_relative_eq!(top, GLYPH_HEIGHT / 2.0, epsilon = EPSILON);
        // middle bar is shorter than the others
        let middle = e[12..18].iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert_relative_eq!(middle, -GLYPH_WIDTH / 2.0 + GLYPH_WIDTH * 0.8, epsilon = EPSILON);
    }

    #[test]
    fn test_letter_i_is_centered() {
        let i = letter_i();
        assert_eq!(i.len(), 18);
        let min_x = i.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let max_x = i.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert_relative_eq!(min_x, -max_x, epsilon = EPSILON);
    }

    #[test]
    fn test_rect_winding() {
        let mut vertices = Vec::new();
        push_rect(&mut vertices, 0.0, 0.0, 2.0, 1.0);
        assert_eq!(vertices[0].position, [0.0, 1.0, 0.0]);
        assert_eq!(vertices[2].position, [2.0, 0.0, 0.0]);
        assert_eq!(vertices[5].position, [2.0, 1.0, 0.0]);
    }
}
