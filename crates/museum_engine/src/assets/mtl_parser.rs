//! MTL (Material Template Library) parser
//!
//! Only what the museum's props use: diffuse colour, opacity and the diffuse
//! texture map. Other statements are skipped.

use super::obj_loader::ObjError;
use super::DEFAULT_BASE_COLOR;
use crate::foundation::math::Vec3;
use std::collections::HashMap;

/// One parsed `newmtl` block
#[derive(Debug, Clone, PartialEq)]
pub struct MtlData {
    /// Material name
    pub name: String,
    /// Diffuse colour (Kd)
    pub diffuse: Vec3,
    /// Opacity (d, or 1 - Tr)
    pub dissolve: f32,
    /// Diffuse texture path (map_Kd), relative to the MTL file
    pub diffuse_map: Option<String>,
}

impl MtlData {
    fn named(name: &str) -> Self {
        let [r, g, b] = DEFAULT_BASE_COLOR;
        Self {
            name: name.to_string(),
            diffuse: Vec3::new(r, g, b),
            dissolve: 1.0,
            diffuse_map: None,
        }
    }
}

/// MTL file parser
pub struct MtlParser;

impl MtlParser {
    /// Parse MTL text into a name → material map
    pub fn parse(contents: &str) -> Result<HashMap<String, MtlData>, ObjError> {
        let mut materials = HashMap::new();
        let mut current: Option<MtlData> = None;

        for (line_num, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
            let rest = rest.trim();

            if command == "newmtl" {
                if rest.is_empty() {
                    return Err(ObjError::ParseError(format!("Line {}: newmtl missing material name", line_num + 1)));
                }
                if let Some(done) = current.replace(MtlData::named(rest)) {
                    materials.insert(done.name.clone(), done);
                }
                continue;
            }

            let Some(material) = current.as_mut() else {
                continue;
            };

            match command {
                "Kd" => material.diffuse = Self::parse_color(rest, line_num)?,
                "d" => material.dissolve = Self::parse_scalar(rest, line_num, command)?,
                "Tr" => material.dissolve = 1.0 - Self::parse_scalar(rest, line_num, command)?,
                "map_Kd" if !rest.is_empty() => material.diffuse_map = Some(rest.to_string()),
                _ => {}
            }
        }

        if let Some(done) = current {
            materials.insert(done.name.clone(), done);
        }

        Ok(materials)
    }

    fn parse_scalar(text: &str, line_num: usize, command: &str) -> Result<f32, ObjError> {
        text.split_whitespace()
            .next()
            .and_then(|token| token.parse().ok())
            .ok_or_else(|| ObjError::ParseError(format!("Line {}: {command} needs a number", line_num + 1)))
    }

    fn parse_color(text: &str, line_num: usize) -> Result<Vec3, ObjError> {
        let values = text
            .split_whitespace()
            .map(str::parse::<f32>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ObjError::ParseError(format!("Line {}: Kd has an invalid component", line_num + 1)))?;
        match values.as_slice() {
            [r, g, b, ..] => Ok(Vec3::new(*r, *g, *b)),
            _ => Err(ObjError::ParseError(format!("Line {}: Kd needs three components", line_num + 1))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FLASHLIGHT_MTL: &str = "
# Blender MTL File
newmtl body
Ns 250.0
Kd 0.1 0.1 0.12
d 1.0

newmtl lens
Kd 0.9 0.9 0.7
Tr 0.25
map_Kd Linterna COLOR.jpg
";

    #[test]
    fn test_parse_two_materials() {
        let materials = MtlParser::parse(FLASHLIGHT_MTL).unwrap();
        assert_eq!(materials.len(), 2);
        assert_relative_eq!(materials["body"].diffuse.z, 0.12);
        assert!(materials["body"].diffuse_map.is_none());
    }

    #[test]
    fn test_texture_path_keeps_spaces_and_tr_inverts() {
        let materials = MtlParser::parse(FLASHLIGHT_MTL).unwrap();
        let lens = &materials["lens"];
        assert_eq!(lens.diffuse_map.as_deref(), Some("Linterna COLOR.jpg"));
        assert_relative_eq!(lens.dissolve, 0.75);
    }

    #[test]
    fn test_statements_before_newmtl_are_ignored() {
        let materials = MtlParser::parse("Kd 1 0 0\nnewmtl only\n").unwrap();
        assert_relative_eq!(materials["only"].diffuse.x, 0.8);
    }

    #[test]
    fn test_short_color_is_an_error() {
        assert!(MtlParser::parse("newmtl bad\nKd 1 0\n").is_err());
    }
}
