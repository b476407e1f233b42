//! Image loading for textures
//!
//! Every image is normalised to tightly packed RGBA8 before it is stored.

use crate::assets::AssetError;
use std::path::Path;

/// Decoded RGBA8 pixels ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Err(AssetError::NotFound(path_ref.display().to_string()));
        }

        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("{}: {e}", path_ref.display())))?
            .to_rgba8();
        let (width, height) = img.dimensions();

        log::info!("Loaded image {}x{} from {:?}", width, height, path_ref);

        Ok(Self {
            data: img.into_raw(),
            width,
            height,
        })
    }

    /// Wrap pixels with `channels` 8-bit components per texel (1 to 4)
    pub fn from_channels(pixels: &[u8], width: u32, height: u32, channels: usize) -> Result<Self, AssetError> {
        let texels = width as usize * height as usize;
        if !(1..=4).contains(&channels) || pixels.len() != texels * channels {
            return Err(AssetError::InvalidData(format!(
                "{} bytes do not form a {width}x{height} image with {channels} channels",
                pixels.len()
            )));
        }

        let mut data = Vec::with_capacity(texels * 4);
        for texel in pixels.chunks_exact(channels) {
            let rgba = match *texel {
                [l] => [l, l, l, 255],
                [l, a] => [l, l, l, a],
                [r, g, b] => [r, g, b, 255],
                [r, g, b, a] => [r, g, b, a],
                _ => unreachable!("chunks_exact yields exactly `channels` bytes"),
            };
            data.extend_from_slice(&rgba);
        }

        Ok(Self { data, width, height })
    }

    /// Create a solid color image
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let texels = width as usize * height as usize;
        Self {
            data: color.repeat(texels),
            width,
            height,
        }
    }

    /// Mean colour in [0, 1], ignoring alpha
    #[allow(clippy::cast_precision_loss)]
    pub fn average_color(&self) -> [f32; 3] {
        let texels = self.data.len() / 4;
        if texels == 0 {
            return [0.0; 3];
        }
        let mut sum = [0u64; 3];
        for texel in self.data.chunks_exact(4) {
            for (total, &channel) in sum.iter_mut().zip(texel) {
                *total += u64::from(channel);
            }
        }
        sum.map(|total| total as f32 / (texels as f32 * 255.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.data.len(), 4 * 4 * 4);
        assert_eq!(&img.data[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_rgb_expands_to_rgba() {
        let img = ImageData::from_channels(&[10, 20, 30, 40, 50, 60], 2, 1, 3).unwrap();
        assert_eq!(img.data, vec![10, 20, 30, 255, 40, 50, 60, 255]);
    }

    #[test]
    fn test_wrong_length_is_rejected() {
        assert!(ImageData::from_channels(&[0, 0, 0], 2, 2, 3).is_err());
    }

    #[test]
    fn test_average_color() {
        let img = ImageData::solid_color(2, 2, [255, 0, 51, 255]);
        let [r, g, b] = img.average_color();
        assert_relative_eq!(r, 1.0);
        assert_relative_eq!(g, 0.0);
        assert_relative_eq!(b, 0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = ImageData::from_file("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }
}
