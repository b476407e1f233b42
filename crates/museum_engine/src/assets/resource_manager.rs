//! Resource Manager - CPU-side asset storage and caching
//!
//! The resource manager owns every mesh and image the game loads and hands
//! out slot map keys for them. Paths are resolved against a root directory
//! and loaded at most once; asking for the same path again returns the
//! identity from the first call, including the zero-count sentinel when the
//! first load failed.
//!
//! A graphics backend reads the data back with [`ResourceManager::mesh`] and
//! [`ResourceManager::image`] when it creates GPU buffers.

use crate::assets::gltf_loader::GltfLoader;
use crate::assets::image_loader::ImageData;
use crate::assets::mtl_parser::MtlParser;
use crate::assets::obj_loader::ObjLoader;
use crate::assets::{
    AssetError, AssetLoader, ExternalModel, MaterialInfo, MeshData, Model, ModelWithMaterial,
    Vertex,
};
use crate::foundation::collections::{HandleMap, ModelId, TextureHandle};
use crate::foundation::math::Vec3;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// World units covered by one repeat of a planar texture
pub const PLANAR_TILE_SIZE: f32 = 1.0;

/// Loaded asset counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceStats {
    pub meshes: usize,
    pub textures: usize,
    pub failed_loads: usize,
}

/// Caching asset store implementing [`AssetLoader`]
pub struct ResourceManager {
    root: PathBuf,
    meshes: HandleMap<ModelId, MeshData>,
    images: HandleMap<TextureHandle, ImageData>,
    textures_by_name: HashMap<String, TextureHandle>,
    textures_by_path: HashMap<PathBuf, Option<TextureHandle>>,
    models: HashMap<String, Model>,
    planar_models: HashMap<String, Model>,
    material_models: HashMap<String, ModelWithMaterial>,
    external_models: HashMap<String, ExternalModel>,
    failed_loads: usize,
}

impl ResourceManager {
    /// Create a manager resolving relative paths against `root`
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            meshes: HandleMap::with_key(),
            images: HandleMap::with_key(),
            textures_by_name: HashMap::new(),
            textures_by_path: HashMap::new(),
            models: HashMap::new(),
            planar_models: HashMap::new(),
            material_models: HashMap::new(),
            external_models: HashMap::new(),
            failed_loads: 0,
        }
    }

    /// Asset root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Mesh data behind a model identity
    pub fn mesh(&self, id: ModelId) -> Option<&MeshData> {
        self.meshes.get(id)
    }

    /// Image data behind a texture handle
    pub fn image(&self, handle: TextureHandle) -> Option<&ImageData> {
        self.images.get(handle)
    }

    pub fn stats(&self) -> ResourceStats {
        ResourceStats {
            meshes: self.meshes.len(),
            textures: self.images.len(),
            failed_loads: self.failed_loads,
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn report_failure(&mut self, kind: &str, path: &str, error: &AssetError) {
        self.failed_loads += 1;
        log::warn!("Failed to load {} '{}': {}", kind, path, error);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn insert_mesh(&mut self, name: &str, vertices: Vec<Vertex>, indices: Vec<u32>) -> Model {
        let vertex_count = vertices.len() as u32;
        let id = self.meshes.insert(MeshData { vertices, indices });
        Model {
            id,
            name: name.to_string(),
            vertex_count,
        }
    }

    fn insert_image(&mut self, name: &str, image: ImageData) -> TextureHandle {
        let handle = self.images.insert(image);
        self.textures_by_name.insert(name.to_string(), handle);
        handle
    }

    fn read_obj(&mut self, path: &str, planar: bool) -> Model {
        let resolved = self.resolve(path);
        match ObjLoader::load_obj(&resolved) {
            Ok(mut data) => {
                if planar {
                    data.regenerate_planar_uvs(PLANAR_TILE_SIZE);
                }
                let model = self.insert_mesh(path, data.vertices, Vec::new());
                log::info!("Loaded model '{}' ({} vertices)", path, model.vertex_count);
                model
            }
            Err(e) => {
                self.report_failure("model", path, &AssetError::from(e));
                Model::missing(path)
            }
        }
    }

    fn read_obj_with_materials(&mut self, path: &str) -> Result<ModelWithMaterial, AssetError> {
        let resolved = self.resolve(path);
        let data = ObjLoader::load_obj(&resolved)?;
        let directory = resolved.parent().map(Path::to_path_buf).unwrap_or_default();

        let mut materials = HashMap::new();
        for library in &data.material_libraries {
            let library_path = directory.join(library);
            let contents = match std::fs::read_to_string(&library_path) {
                Ok(contents) => contents,
                Err(e) => {
                    log::warn!("Missing material library {:?}: {}", library_path, e);
                    continue;
                }
            };
            for (name, mtl) in MtlParser::parse(&contents)? {
                let texture = mtl.diffuse_map.as_ref().and_then(|map| {
                    let texture_path = directory.join(map);
                    self.load_texture_path(&name, &texture_path)
                });
                materials.insert(
                    name.clone(),
                    MaterialInfo {
                        name,
                        diffuse: mtl.diffuse,
                        texture,
                    },
                );
            }
        }

        let face_materials = data.face_materials;
        let model = self.insert_mesh(path, data.vertices, Vec::new());
        Ok(ModelWithMaterial {
            id: model.id,
            name: model.name,
            vertex_count: model.vertex_count,
            face_materials,
            materials,
        })
    }

    #[allow(clippy::cast_possible_truncation)]
    fn read_gltf(&mut self, path: &str) -> Result<ExternalModel, AssetError> {
        let resolved = self.resolve(path);
        let data = GltfLoader::load(&resolved)?;

        let texture = data
            .texture
            .map(|image| self.insert_image(&format!("{path}#base_color"), image));
        let vertex_count = data.vertices.len() as u32;
        let index_count = data.indices.len() as u32;
        let id = self.meshes.insert(MeshData {
            vertices: data.vertices,
            indices: data.indices,
        });
        let [r, g, b] = data.base_color;

        Ok(ExternalModel {
            id,
            name: path.to_string(),
            vertex_count,
            index_count,
            texture,
            base_color: Vec3::new(r, g, b),
        })
    }

    fn load_texture_path(&mut self, name: &str, path: &Path) -> Option<TextureHandle> {
        if let Some(cached) = self.textures_by_path.get(path) {
            if let Some(handle) = *cached {
                self.textures_by_name.insert(name.to_string(), handle);
            }
            return *cached;
        }

        let handle = match ImageData::from_file(path) {
            Ok(image) => {
                log::info!("Loaded texture '{}' from {:?}", name, path);
                Some(self.insert_image(name, image))
            }
            Err(e) => {
                self.report_failure("texture", &path.display().to_string(), &e);
                None
            }
        };
        self.textures_by_path.insert(path.to_path_buf(), handle);
        handle
    }
}

impl AssetLoader for ResourceManager {
    fn load_model(&mut self, path: &str) -> Model {
        if let Some(model) = self.models.get(path) {
            return model.clone();
        }
        let model = self.read_obj(path, false);
        self.models.insert(path.to_string(), model.clone());
        model
    }

    fn load_model_planar(&mut self, path: &str) -> Model {
        if let Some(model) = self.planar_models.get(path) {
            return model.clone();
        }
        let model = self.read_obj(path, true);
        self.planar_models.insert(path.to_string(), model.clone());
        model
    }

    fn load_mesh_with_material(&mut self, path: &str) -> ModelWithMaterial {
        if let Some(model) = self.material_models.get(path) {
            return model.clone();
        }
        let model = match self.read_obj_with_materials(path) {
            Ok(model) => {
                log::info!(
                    "Loaded model '{}' ({} vertices, {} materials)",
                    path,
                    model.vertex_count,
                    model.materials.len()
                );
                model
            }
            Err(e) => {
                self.report_failure("model", path, &e);
                ModelWithMaterial::missing(path)
            }
        };
        self.material_models.insert(path.to_string(), model.clone());
        model
    }

    fn load_external_model(&mut self, path: &str) -> ExternalModel {
        if let Some(model) = self.external_models.get(path) {
            return model.clone();
        }
        let model = match self.read_gltf(path) {
            Ok(model) => {
                log::info!(
                    "Loaded model '{}' ({} vertices, {} indices)",
                    path,
                    model.vertex_count,
                    model.index_count
                );
                model
            }
            Err(e) => {
                self.report_failure("model", path, &e);
                ExternalModel::missing(path)
            }
        };
        self.external_models.insert(path.to_string(), model.clone());
        model
    }

    fn load_texture(&mut self, name: &str, path: &str) -> Option<TextureHandle> {
        let resolved = self.resolve(path);
        self.load_texture_path(name, &resolved)
    }

    fn texture(&self, name: &str) -> Option<TextureHandle> {
        self.textures_by_name.get(name).copied()
    }

    fn register_mesh(&mut self, name: &str, vertices: Vec<Vertex>) -> Model {
        self.insert_mesh(name, vertices, Vec::new())
    }
}
