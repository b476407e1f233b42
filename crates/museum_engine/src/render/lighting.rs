//! Lighting system
//!
//! The scene hands the renderer one [`LightingFrame`] per frame: the static
//! room lights, whichever spotlights visitors have switched on, and the
//! flashlight when it is on. [`LightingUniforms`] is the fixed-size block a
//! backend uploads as-is.

use crate::foundation::math::Vec3;
use bytemuck::{Pod, Zeroable};

/// Maximum number of lights carried in the uniform block
pub const MAX_LIGHTS: usize = 16;

/// Light types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    /// Point light (like a lightbulb)
    Point,
    /// Spot light aimed straight down from the ceiling
    Spot,
}

/// Light source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Light type
    pub light_type: LightType,
    /// Light position
    pub position: Vec3,
    /// Light direction (spot lights)
    pub direction: Vec3,
    /// Light color
    pub color: Vec3,
    /// Light intensity
    pub intensity: f32,
}

impl Light {
    /// Create a white point light
    pub fn point(position: Vec3) -> Self {
        Self {
            light_type: LightType::Point,
            position,
            direction: Vec3::zeros(),
            color: Vec3::new(1.0, 1.0, 1.0),
            intensity: 1.0,
        }
    }

    /// Create a white spot light
    pub fn spot(position: Vec3, direction: Vec3) -> Self {
        Self {
            light_type: LightType::Spot,
            position,
            direction: direction.normalize(),
            color: Vec3::new(1.0, 1.0, 1.0),
            intensity: 1.0,
        }
    }

    /// Override the color
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    /// Override the intensity
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }
}

/// Hand-held light following the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flashlight {
    /// Camera position
    pub position: Vec3,
    /// Camera view direction
    pub direction: Vec3,
}

/// Everything the renderer needs to light one frame
#[derive(Debug, Clone, PartialEq)]
pub struct LightingFrame {
    /// Active lights in the scene
    pub lights: Vec<Light>,
    /// Flashlight, when switched on
    pub flashlight: Option<Flashlight>,
    /// Ambient light color
    pub ambient: Vec3,
}

impl Default for LightingFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl LightingFrame {
    /// Create an empty frame with dim ambient light
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            flashlight: None,
            ambient: Vec3::new(0.1, 0.1, 0.1),
        }
    }

    /// Add a light to the frame
    pub fn add_light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    /// Add several lights
    pub fn extend_lights(mut self, lights: impl IntoIterator<Item = Light>) -> Self {
        self.lights.extend(lights);
        self
    }

    /// Set the flashlight
    pub fn with_flashlight(mut self, flashlight: Option<Flashlight>) -> Self {
        self.flashlight = flashlight;
        self
    }

    /// Set ambient lighting
    pub fn with_ambient(mut self, ambient: Vec3) -> Self {
        self.ambient = ambient;
        self
    }

    /// Light positions in order
    pub fn positions(&self) -> Vec<Vec3> {
        self.lights.iter().map(|light| light.position).collect()
    }

    /// Pack into the uniform block; lights beyond [`MAX_LIGHTS`] are dropped
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn to_uniforms(&self) -> LightingUniforms {
        if self.lights.len() > MAX_LIGHTS {
            log::warn!("{} lights active, only {} uploaded", self.lights.len(), MAX_LIGHTS);
        }

        let mut uniforms = LightingUniforms::zeroed();
        for (slot, light) in uniforms.lights.iter_mut().zip(&self.lights) {
            *slot = [light.position.x, light.position.y, light.position.z, light.intensity];
        }
        uniforms.light_count = self.lights.len().min(MAX_LIGHTS) as i32;
        uniforms.ambient = [self.ambient.x, self.ambient.y, self.ambient.z, 1.0];
        if let Some(flashlight) = &self.flashlight {
            uniforms.flashlight_on = 1;
            uniforms.flashlight_position = [flashlight.position.x, flashlight.position.y, flashlight.position.z, 1.0];
            uniforms.flashlight_direction = [flashlight.direction.x, flashlight.direction.y, flashlight.direction.z, 0.0];
        }
        uniforms
    }
}

/// GPU layout of the lighting state (std140 compatible)
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightingUniforms {
    /// xyz position, w intensity
    pub lights: [[f32; 4]; MAX_LIGHTS],
    /// Ambient color, w unused
    pub ambient: [f32; 4],
    /// Flashlight position, w = 1
    pub flashlight_position: [f32; 4],
    /// Flashlight direction, w = 0
    pub flashlight_direction: [f32; 4],
    /// Number of valid entries in `lights`
    pub light_count: i32,
    /// 1 when the flashlight is on
    pub flashlight_on: i32,
    _padding: [i32; 2],
}
