//! OBJ file loader for 3D models
//!
//! Faces are fan-triangulated and unrolled into a plain triangle list, so the
//! vertex count is what a non-indexed draw consumes. `mtllib` and `usemtl`
//! are tracked so each triangle remembers its material.

use super::Vertex;
use std::path::Path;
use thiserror::Error;

/// OBJ parse errors
#[derive(Error, Debug)]
pub enum ObjError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed number or index
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Structurally invalid file
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Parsed OBJ contents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjData {
    /// Triangle list vertices
    pub vertices: Vec<Vertex>,
    /// Material name per triangle (empty when no `usemtl` was active)
    pub face_materials: Vec<String>,
    /// Material libraries referenced by `mtllib`
    pub material_libraries: Vec<String>,
}

impl ObjData {
    /// Replace texture coordinates with a planar (x, z) projection and point normals up
    pub fn regenerate_planar_uvs(&mut self, tile_size: f32) {
        for vertex in &mut self.vertices {
            vertex.normal = [0.0, 1.0, 0.0];
            vertex.tex_coord = [vertex.position[0] / tile_size, vertex.position[2] / tile_size];
        }
    }
}

/// OBJ loader
pub struct ObjLoader;

impl ObjLoader {
    /// Load an OBJ file from disk
    pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<ObjData, ObjError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse OBJ text
    pub fn parse(contents: &str) -> Result<ObjData, ObjError> {
        let mut positions: Vec<[f32; 3]> = Vec::new();
        let mut normals: Vec<[f32; 3]> = Vec::new();
        let mut tex_coords: Vec<[f32; 2]> = Vec::new();
        let mut data = ObjData::default();
        let mut current_material = String::new();

        for (line_num, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts[0] {
                "v" => positions.push(Self::parse_floats::<3>(&parts, line_num, "vertex")?),
                "vn" => normals.push(Self::parse_floats::<3>(&parts, line_num, "normal")?),
                "vt" => tex_coords.push(Self::parse_floats::<2>(&parts, line_num, "tex coord")?),
                "usemtl" => current_material = parts.get(1).copied().unwrap_or_default().to_string(),
                "mtllib" => data.material_libraries.extend(parts[1..].iter().map(ToString::to_string)),
                "f" => {
                    if parts.len() < 4 {
                        return Err(ObjError::InvalidFormat(format!(
                            "Line {}: face needs at least 3 vertices",
                            line_num + 1
                        )));
                    }

                    let corners = parts[1..]
                        .iter()
                        .map(|corner| Self::parse_corner(corner, &positions, &tex_coords, &normals, line_num))
                        .collect::<Result<Vec<_>, _>>()?;

                    // Fan triangulation
                    for i in 1..corners.len() - 1 {
                        data.vertices.push(corners[0]);
                        data.vertices.push(corners[i]);
                        data.vertices.push(corners[i + 1]);
                        data.face_materials.push(current_material.clone());
                    }
                }
                _ => {}
            }
        }

        if data.vertices.is_empty() {
            return Err(ObjError::InvalidFormat("No faces found in OBJ file".to_string()));
        }

        Ok(data)
    }

    fn parse_floats<const N: usize>(parts: &[&str], line_num: usize, what: &str) -> Result<[f32; N], ObjError> {
        let mut values = [0.0; N];
        for (i, value) in values.iter_mut().enumerate() {
            let token = parts
                .get(i + 1)
                .ok_or_else(|| ObjError::ParseError(format!("Line {}: {what} has too few components", line_num + 1)))?;
            *value = token
                .parse()
                .map_err(|_| ObjError::ParseError(format!("Line {}: invalid {what} component {token}", line_num + 1)))?;
        }
        Ok(values)
    }

    fn parse_corner(
        corner: &str,
        positions: &[[f32; 3]],
        tex_coords: &[[f32; 2]],
        normals: &[[f32; 3]],
        line_num: usize,
    ) -> Result<Vertex, ObjError> {
        let mut fields = corner.split('/');

        let position = fields
            .next()
            .and_then(|field| Self::resolve_index(field, positions.len()))
            .and_then(|index| positions.get(index))
            .ok_or_else(|| ObjError::InvalidFormat(format!("Line {}: bad position index in {corner}", line_num + 1)))?;

        let tex_coord = fields
            .next()
            .and_then(|field| Self::resolve_index(field, tex_coords.len()))
            .and_then(|index| tex_coords.get(index))
            .copied()
            .unwrap_or([0.0, 0.0]);

        let normal = fields
            .next()
            .and_then(|field| Self::resolve_index(field, normals.len()))
            .and_then(|index| normals.get(index))
            .copied()
            .unwrap_or([0.0, 1.0, 0.0]);

        Ok(Vertex {
            position: *position,
            normal,
            tex_coord,
        })
    }

    /// OBJ indices are 1-based; negative ones count back from the end
    fn resolve_index(field: &str, len: usize) -> Option<usize> {
        let index: i64 = field.parse().ok()?;
        let len = i64::try_from(len).ok()?;
        let resolved = if index < 0 { len + index } else { index - 1 };
        usize::try_from(resolved).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const QUAD: &str = "\
mtllib flashlight.mtl
v -1.0 0.0 -1.0
v 1.0 0.0 -1.0
v 1.0 0.0 1.0
v -1.0 0.0 1.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
vn 0.0 1.0 0.0
usemtl body
f 1/1/1 2/2/1 3/3/1 4/4/1
usemtl lens
f 1 3 4
";

    #[test]
    fn test_quad_is_fan_triangulated() {
        let data = ObjLoader::parse(QUAD).unwrap();
        assert_eq!(data.vertices.len(), 9);
        assert_eq!(data.face_materials, vec!["body", "body", "lens"]);
        assert_eq!(data.material_libraries, vec!["flashlight.mtl"]);
        assert_eq!(data.vertices[1].tex_coord, [1.0, 0.0]);
        assert_eq!(data.vertices[4].tex_coord, [1.0, 1.0]);
    }

    #[test]
    fn test_missing_attributes_default() {
        let data = ObjLoader::parse(QUAD).unwrap();
        let lens = data.vertices[6];
        assert_eq!(lens.tex_coord, [0.0, 0.0]);
        assert_eq!(lens.normal, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_negative_indices() {
        let data = ObjLoader::parse("v 0 0 0\nv 1 0 0\nv 0 0 1\nf -3 -2 -1\n").unwrap();
        assert_eq!(data.vertices[1].position, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_out_of_range_index_is_an_error() {
        let err = ObjLoader::parse("v 0 0 0\nf 1 2 3\n").unwrap_err();
        assert!(matches!(err, ObjError::InvalidFormat(_)));
    }

    #[test]
    fn test_file_without_faces_is_an_error() {
        assert!(ObjLoader::parse("v 0 0 0\n").is_err());
    }

    #[test]
    fn test_planar_uvs() {
        let mut data = ObjLoader::parse(QUAD).unwrap();
        data.regenerate_planar_uvs(1.0);
        let corner = data.vertices[2];
        assert_relative_eq!(corner.tex_coord[0], 1.0);
        assert_relative_eq!(corner.tex_coord[1], 1.0);
    }
}
