//! Asset management system
//!
//! Models and textures are loaded once at start-up through an
//! [`AssetLoader`]. A failed load is never fatal: the loader logs the cause
//! and returns a sentinel with zero vertices, and every draw path skips
//! models whose counts are zero.

pub mod obj_loader;
pub mod mtl_parser;
pub mod gltf_loader;
pub mod image_loader;
pub mod resource_manager;

pub use gltf_loader::{GltfData, GltfError, GltfLoader};
pub use image_loader::ImageData;
pub use mtl_parser::{MtlData, MtlParser};
pub use obj_loader::{ObjData, ObjError, ObjLoader};
pub use resource_manager::ResourceManager;

use crate::foundation::collections::{ModelId, TextureHandle};
use crate::foundation::math::Vec3;
use std::collections::HashMap;
use std::ops::Range;
use thiserror::Error;

/// Colour used when a file carries none
pub const DEFAULT_BASE_COLOR: [f32; 3] = [0.8, 0.8, 0.8];

/// Vertex layout shared by every loader
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    /// Position in model space
    pub position: [f32; 3],
    /// Surface normal
    pub normal: [f32; 3],
    /// Texture coordinate
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Vertex with an up normal and zero texture coordinate
    pub fn at(position: [f32; 3]) -> Self {
        Self {
            position,
            normal: [0.0, 1.0, 0.0],
            tex_coord: [0.0, 0.0],
        }
    }
}

/// CPU-side mesh kept for the graphics backend
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertices
    pub vertices: Vec<Vertex>,
    /// Triangle indices; empty for a plain triangle list
    pub indices: Vec<u32>,
}

/// A mesh drawn as a plain triangle list
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Identity handed to the renderer
    pub id: ModelId,
    /// Source path or registered name
    pub name: String,
    /// Number of vertices; zero marks a failed load
    pub vertex_count: u32,
}

impl Model {
    /// Sentinel for a model that failed to load
    pub fn missing(name: &str) -> Self {
        Self {
            id: ModelId::default(),
            name: name.to_string(),
            vertex_count: 0,
        }
    }

    /// Whether there is anything to draw
    pub fn is_renderable(&self) -> bool {
        self.vertex_count > 0
    }
}

/// Material entry from an MTL library
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialInfo {
    /// Material name
    pub name: String,
    /// Diffuse colour
    pub diffuse: Vec3,
    /// Diffuse texture, when one was listed and loaded
    pub texture: Option<TextureHandle>,
}

/// Consecutive triangles sharing one material
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialRun<'a> {
    /// Vertex range of the run in the triangle list
    pub vertices: Range<u32>,
    /// Material name
    pub material: &'a str,
}

/// A triangle-list mesh whose faces reference named materials
#[derive(Debug, Clone, PartialEq)]
pub struct ModelWithMaterial {
    /// Identity handed to the renderer
    pub id: ModelId,
    /// Source path
    pub name: String,
    /// Number of vertices; zero marks a failed load
    pub vertex_count: u32,
    /// Material name of each triangle
    pub face_materials: Vec<String>,
    /// Material table keyed by name
    pub materials: HashMap<String, MaterialInfo>,
}

impl ModelWithMaterial {
    /// Sentinel for a model that failed to load
    pub fn missing(name: &str) -> Self {
        Self {
            id: ModelId::default(),
            name: name.to_string(),
            vertex_count: 0,
            face_materials: Vec::new(),
            materials: HashMap::new(),
        }
    }

    /// Whether there is anything to draw
    pub fn is_renderable(&self) -> bool {
        self.vertex_count > 0
    }

    /// Group consecutive triangles with the same material
    #[allow(clippy::cast_possible_truncation)]
    pub fn material_runs(&self) -> Vec<MaterialRun<'_>> {
        let mut runs: Vec<MaterialRun<'_>> = Vec::new();
        for (face, material) in self.face_materials.iter().enumerate() {
            let start = face as u32 * 3;
            match runs.last_mut() {
                Some(run) if run.material == material.as_str() => run.vertices.end = start + 3,
                _ => runs.push(MaterialRun {
                    vertices: start..start + 3,
                    material: material.as_str(),
                }),
            }
        }
        runs
    }

    /// Material by name
    pub fn material(&self, name: &str) -> Option<&MaterialInfo> {
        self.materials.get(name)
    }
}

/// An indexed mesh from an interchange file (glTF/GLB)
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalModel {
    /// Identity handed to the renderer
    pub id: ModelId,
    /// Source path
    pub name: String,
    /// Number of vertices; zero marks a failed load
    pub vertex_count: u32,
    /// Number of indices; zero marks a failed load
    pub index_count: u32,
    /// Embedded base colour texture
    pub texture: Option<TextureHandle>,
    /// Approximate base colour for untextured drawing
    pub base_color: Vec3,
}

impl ExternalModel {
    /// Sentinel for a model that failed to load
    pub fn missing(name: &str) -> Self {
        let [r, g, b] = DEFAULT_BASE_COLOR;
        Self {
            id: ModelId::default(),
            name: name.to_string(),
            vertex_count: 0,
            index_count: 0,
            texture: None,
            base_color: Vec3::new(r, g, b),
        }
    }

    /// Whether there is anything to draw
    pub fn is_renderable(&self) -> bool {
        self.vertex_count > 0 && self.index_count > 0
    }
}

/// Loads models and textures once and hands out their identities
pub trait AssetLoader {
    /// Load an OBJ mesh as a triangle list
    fn load_model(&mut self, path: &str) -> Model;

    /// Load an OBJ mesh with (x, z) planar texture coordinates and up normals
    fn load_model_planar(&mut self, path: &str) -> Model;

    /// Load an OBJ mesh together with its MTL materials
    fn load_mesh_with_material(&mut self, path: &str) -> ModelWithMaterial;

    /// Load a glTF/GLB model
    fn load_external_model(&mut self, path: &str) -> ExternalModel;

    /// Load an image and register it under `name`
    fn load_texture(&mut self, name: &str, path: &str) -> Option<TextureHandle>;

    /// Texture registered under `name`
    fn texture(&self, name: &str) -> Option<TextureHandle>;

    /// Register generated geometry as a triangle list
    fn register_mesh(&mut self, name: &str, vertices: Vec<Vertex>) -> Model;
}

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Unsupported asset format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// OBJ or MTL parse failure
    #[error("OBJ error: {0}")]
    Obj(#[from] ObjError),

    /// glTF failure
    #[error("glTF error: {0}")]
    Gltf(#[from] GltfError),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flashlight(faces: &[&str]) -> ModelWithMaterial {
        ModelWithMaterial {
            vertex_count: u32::try_from(faces.len() * 3).unwrap(),
            face_materials: faces.iter().map(ToString::to_string).collect(),
            ..ModelWithMaterial::missing("flashlight.obj")
        }
    }

    #[test]
    fn test_material_runs_group_consecutive_faces() {
        let model = flashlight(&["body", "body", "lens", "body"]);
        let runs = model.material_runs();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0], MaterialRun { vertices: 0..6, material: "body" });
        assert_eq!(runs[1], MaterialRun { vertices: 6..9, material: "lens" });
        assert_eq!(runs[2], MaterialRun { vertices: 9..12, material: "body" });
    }

    #[test]
    fn test_sentinels_are_not_renderable() {
        assert!(!Model::missing("carpet.obj").is_renderable());
        assert!(!ModelWithMaterial::missing("flashlight.obj").is_renderable());
        assert!(!ExternalModel::missing("effigy.glb").is_renderable());
    }

    #[test]
    fn test_external_model_needs_indices() {
        let model = ExternalModel {
            vertex_count: 12,
            ..ExternalModel::missing("skull.glb")
        };
        assert!(!model.is_renderable());
    }
}
