//! Museum configuration
//!
//! Every field has a default, so a partial `museum.toml` only needs to name
//! the values it changes.

use museum_engine::config::Config;
use museum_engine::foundation::logging::LevelFilter;
use museum_engine::foundation::math::Vec3;
use museum_engine::input::KeyCode;
use museum_engine::render::CameraSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MuseumConfig {
    /// Window settings
    pub window: WindowConfig,
    /// Free camera tunables
    pub camera: CameraSettings,
    /// Interaction tunables
    pub interaction: InteractionConfig,
    /// Key bindings
    pub controls: ControlsConfig,
    /// Directory every model and texture path is resolved against
    pub assets_root: PathBuf,
    /// Default log level; `RUST_LOG` overrides it
    pub log_level: String,
    /// Background colour
    pub clear_color: [f32; 3],
}

impl Default for MuseumConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraSettings::default(),
            interaction: InteractionConfig::default(),
            controls: ControlsConfig::default(),
            assets_root: PathBuf::from("assets"),
            log_level: "info".to_string(),
            clear_color: [0.15, 0.15, 0.2],
        }
    }
}

impl Config for MuseumConfig {}

impl MuseumConfig {
    /// Parsed log level, `Info` when the string is not a level name
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// Background colour as a vector
    pub fn clear_color(&self) -> Vec3 {
        let [r, g, b] = self.clear_color;
        Vec3::new(r, g, b)
    }

    /// Window aspect ratio
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        self.window.width.max(1) as f32 / self.window.height.max(1) as f32
    }
}

/// Window settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Title bar text
    pub title: String,
    /// Wait for vertical sync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Museum".to_string(),
            vsync: true,
        }
    }
}

/// Interaction tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Distance within which an exhibit reacts to its key
    pub radius: f32,
    /// Degrees of inspection rotation per pixel of drag
    pub drag_sensitivity: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            radius: 3.0,
            drag_sensitivity: 0.5,
        }
    }
}

/// Key bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Float exhibits, toggle spotlights, open doors
    pub interact: KeyCode,
    /// Enter and leave inspection
    pub inspect: KeyCode,
    /// Toggle the flashlight
    pub flashlight: KeyCode,
    /// Hold to move faster
    pub sprint: KeyCode,
    /// Walk forward
    pub forward: KeyCode,
    /// Walk backward
    pub backward: KeyCode,
    /// Strafe left
    pub left: KeyCode,
    /// Strafe right
    pub right: KeyCode,
    /// Close the window
    pub quit: KeyCode,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            interact: KeyCode::E,
            inspect: KeyCode::I,
            flashlight: KeyCode::F,
            sprint: KeyCode::LeftShift,
            forward: KeyCode::W,
            backward: KeyCode::S,
            left: KeyCode::A,
            right: KeyCode::D,
            quit: KeyCode::Escape,
        }
    }
}

impl ControlsConfig {
    /// Every bound key, sampled once per frame
    pub fn watched_keys(&self) -> [KeyCode; 9] {
        [
            self.interact,
            self.inspect,
            self.flashlight,
            self.sprint,
            self.forward,
            self.backward,
            self.left,
            self.right,
            self.quit,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let config = MuseumConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_relative_eq!(config.interaction.radius, 3.0);
        assert_eq!(config.controls.inspect, KeyCode::I);
        assert_eq!(config.level_filter(), LevelFilter::Info);
        assert_relative_eq!(config.aspect_ratio(), 1280.0 / 720.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let path = std::env::temp_dir().join("museum_partial_config.toml");
        std::fs::write(
            &path,
            "log_level = \"debug\"\n\n[interaction]\nradius = 4.5\n\n[controls]\nflashlight = \"L\"\n",
        )
        .unwrap();

        let config = MuseumConfig::load_from_file(&path).unwrap();
        assert_eq!(config.level_filter(), LevelFilter::Debug);
        assert_relative_eq!(config.interaction.radius, 4.5);
        assert_relative_eq!(config.interaction.drag_sensitivity, 0.5);
        assert_eq!(config.controls.flashlight, KeyCode::L);
        assert_eq!(config.controls.interact, KeyCode::E);
        assert_eq!(config.camera, CameraSettings::default());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        let config = MuseumConfig {
            log_level: "chatty".to_string(),
            ..MuseumConfig::default()
        };
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }
}
