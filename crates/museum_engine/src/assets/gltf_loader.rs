//! glTF/GLB model loading
//!
//! Every mesh reachable from the default scene is flattened into one indexed
//! mesh with node transforms baked into positions and normals. The first
//! base colour texture found becomes the model texture.

use crate::assets::image_loader::ImageData;
use crate::assets::{Vertex, DEFAULT_BASE_COLOR};
use crate::foundation::math::{Mat4, Vec3, Vec4};
use std::path::Path;

/// Error type for glTF loading.
#[derive(Debug, thiserror::Error)]
pub enum GltfError {
    #[error("Failed to load glTF file: {0}")]
    LoadError(#[from] gltf::Error),

    #[error("Missing position data for mesh: {0}")]
    MissingPositions(String),

    #[error("Unsupported texture format {0:?}")]
    UnsupportedTextureFormat(gltf::image::Format),

    #[error("File contains no triangles")]
    Empty,
}

/// Flattened contents of a glTF file
#[derive(Debug, Clone, PartialEq)]
pub struct GltfData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    /// Base colour factor of the first material
    pub base_color: [f32; 3],
    /// Decoded base colour texture
    pub texture: Option<ImageData>,
}

pub struct GltfLoader;

impl GltfLoader {
    /// Load a .gltf or .glb file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<GltfData, GltfError> {
        let path = path.as_ref();
        let (document, buffers, images) = gltf::import(path)?;

        let mut data = GltfData {
            vertices: Vec::new(),
            indices: Vec::new(),
            base_color: DEFAULT_BASE_COLOR,
            texture: None,
        };
        let mut material_seen = false;

        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next());
        let roots: Vec<gltf::Node<'_>> = match scene {
            Some(scene) => scene.nodes().collect(),
            None => document.nodes().collect(),
        };

        for node in &roots {
            process_node(
                node,
                &Mat4::identity(),
                &buffers,
                &images,
                &mut data,
                &mut material_seen,
            )?;
        }

        if data.indices.is_empty() {
            return Err(GltfError::Empty);
        }

        log::debug!(
            "Parsed glTF {:?}: {} vertices, {} indices, textured: {}",
            path,
            data.vertices.len(),
            data.indices.len(),
            data.texture.is_some()
        );

        Ok(data)
    }
}

fn node_matrix(node: &gltf::Node<'_>) -> Mat4 {
    let columns = node.transform().matrix();
    let flat: Vec<f32> = columns.iter().flatten().copied().collect();
    Mat4::from_column_slice(&flat)
}

fn process_node(
    node: &gltf::Node<'_>,
    parent: &Mat4,
    buffers: &[gltf::buffer::Data],
    images: &[gltf::image::Data],
    data: &mut GltfData,
    material_seen: &mut bool,
) -> Result<(), GltfError> {
    let world = parent * node_matrix(node);

    if let Some(mesh) = node.mesh() {
        let linear = world.fixed_view::<3, 3>(0, 0).into_owned();
        let normal_matrix = linear.try_inverse().map_or(linear, |m| m.transpose());

        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::warn!("Skipping non-triangle primitive in mesh {:?}", mesh.name());
                continue;
            }
            let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|b| &b.0[..]));

            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .ok_or_else(|| GltfError::MissingPositions(mesh.name().unwrap_or("unnamed").to_string()))?
                .collect();
            let normals: Vec<[f32; 3]> = reader
                .read_normals()
                .map(Iterator::collect)
                .unwrap_or_default();
            let tex_coords: Vec<[f32; 2]> = reader
                .read_tex_coords(0)
                .map(|tc| tc.into_f32().collect())
                .unwrap_or_default();

            #[allow(clippy::cast_possible_truncation)]
            let offset = data.vertices.len() as u32;
            for (i, position) in positions.iter().enumerate() {
                let p = world * Vec4::new(position[0], position[1], position[2], 1.0);
                let normal = normals.get(i).map_or([0.0, 1.0, 0.0], |n| {
                    let n = (normal_matrix * Vec3::new(n[0], n[1], n[2]))
                        .try_normalize(f32::EPSILON)
                        .unwrap_or_else(Vec3::y);
                    [n.x, n.y, n.z]
                });
                data.vertices.push(Vertex {
                    position: [p.x, p.y, p.z],
                    normal,
                    tex_coord: tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
                });
            }

            match reader.read_indices() {
                Some(indices) => data.indices.extend(indices.into_u32().map(|i| i + offset)),
                None => {
                    #[allow(clippy::cast_possible_truncation)]
                    let count = positions.len() as u32;
                    data.indices.extend(offset..offset + count);
                }
            }

            if !*material_seen {
                *material_seen = true;
                let pbr = primitive.material().pbr_metallic_roughness();
                let [r, g, b, _] = pbr.base_color_factor();
                data.base_color = [r, g, b];
                if let Some(info) = pbr.base_color_texture() {
                    let source = info.texture().source().index();
                    if let Some(image) = images.get(source) {
                        data.texture = Some(convert_image(image)?);
                    }
                }
            }
        }
    }

    for child in node.children() {
        process_node(&child, &world, buffers, images, data, material_seen)?;
    }

    Ok(())
}

fn convert_image(image: &gltf::image::Data) -> Result<ImageData, GltfError> {
    use gltf::image::Format;

    let channels = match image.format {
        Format::R8 => 1,
        Format::R8G8 => 2,
        Format::R8G8B8 => 3,
        Format::R8G8B8A8 => 4,
        other => return Err(GltfError::UnsupportedTextureFormat(other)),
    };

    ImageData::from_channels(&image.pixels, image.width, image.height, channels)
        .map_err(|_| GltfError::UnsupportedTextureFormat(image.format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_fails() {
        let result = GltfLoader::load("/nonexistent/model/effigy.glb");
        assert!(matches!(result, Err(GltfError::LoadError(_))));
    }

    #[test]
    fn test_minimal_triangle_file() {
        // One triangle, positions only, buffer embedded as base64
        let positions: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let bytes: Vec<u8> = positions.iter().flat_map(|f| f.to_le_bytes()).collect();
        let encoded = base64_encode(&bytes);
        let json = format!(
            r#"{{
  "asset": {{"version": "2.0"}},
  "scene": 0,
  "scenes": [{{"nodes": [0]}}],
  "nodes": [{{"mesh": 0, "translation": [0.0, 2.0, 0.0]}}],
  "meshes": [{{"primitives": [{{"attributes": {{"POSITION": 0}}}}]}}],
  "accessors": [{{"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                  "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]}}],
  "bufferViews": [{{"buffer": 0, "byteLength": 36}}],
  "buffers": [{{"byteLength": 36, "uri": "data:application/octet-stream;base64,{encoded}"}}]
}}"#
        );
        let path = std::env::temp_dir().join("museum_engine_triangle.gltf");
        std::fs::write(&path, json).unwrap();

        let data = GltfLoader::load(&path).unwrap();
        assert_eq!(data.vertices.len(), 3);
        assert_eq!(data.indices, vec![0, 1, 2]);
        assert_eq!(data.vertices[2].position, [0.0, 3.0, 0.0]);
        assert_eq!(data.base_color, [1.0, 1.0, 1.0]);
        assert!(data.texture.is_none());

        std::fs::remove_file(&path).ok();
    }

    fn base64_encode(bytes: &[u8]) -> String {
        const TABLE: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
        let mut out = String::new();
        for chunk in bytes.chunks(3) {
            let b = [chunk[0], *chunk.get(1).unwrap_or(&0), *chunk.get(2).unwrap_or(&0)];
            let n = (u32::from(b[0]) << 16) | (u32::from(b[1]) << 8) | u32::from(b[2]);
            for i in 0..4 {
                if i <= chunk.len() {
                    out.push(TABLE[((n >> (18 - 6 * i)) & 63) as usize] as char);
                } else {
                    out.push('=');
                }
            }
        }
        out
    }
}
