//! Viewer settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::ViewerContent;

use crate::scene::ModelOptions;
use crate::viewport::lighting::Environment;
use crate::viewport::mesh::MIN_GRID_CELL;

/// UI language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    Ru,
    En,
}

/// What the viewer shows and how
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Initial camera position
    pub camera_position: [f32; 3],
    pub environment: Environment,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    /// Center the model horizontally and rest it on the ground
    pub auto_center: bool,
    /// Show the placeholder objects when no model is given
    pub show_test_objects: bool,
    /// Model URL or path
    pub model: Option<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera_position: [5.0, 5.0, 5.0],
            environment: Environment::City,
            cast_shadow: true,
            receive_shadow: true,
            auto_center: true,
            show_test_objects: true,
            model: None,
        }
    }
}

impl ViewerConfig {
    pub fn content(&self) -> ViewerContent {
        ViewerContent::select(self.model.as_deref(), self.show_test_objects)
    }

    pub fn model_options(&self) -> ModelOptions {
        ModelOptions {
            auto_center: self.auto_center,
            cast_shadow: self.cast_shadow,
            receive_shadow: self.receive_shadow,
            ..Default::default()
        }
    }
}

/// Ground grid settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub visible: bool,
    /// Minor cell size
    pub cell_size: f32,
    /// Major section size
    pub section_size: f32,
    /// Distance at which lines fade out completely
    pub fade_distance: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: true,
            cell_size: 1.0,
            section_size: 5.0,
            fade_distance: 25.0,
        }
    }
}

impl GridSettings {
    /// Replace sizes a hand-edited file may break (zero, negative, NaN)
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let positive = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };
        let cell_size = positive(self.cell_size, defaults.cell_size).max(MIN_GRID_CELL);
        Self {
            visible: self.visible,
            cell_size,
            section_size: positive(self.section_size, defaults.section_size).max(cell_size),
            fade_distance: positive(self.fade_distance, defaults.fade_distance),
        }
    }
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
    pub language: Language,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            language: Language::default(),
        }
    }
}

/// All viewer settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerSettings {
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "blueprint3d", "blueprint-viewer")
        .map(|dirs| dirs.config_dir().join("settings.json"))
}

impl ViewerSettings {
    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|json| serde_json::from_str::<Self>(&json).ok())
            .map(|mut settings| {
                settings.grid = settings.grid.sanitized();
                settings
            })
            .unwrap_or_default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(path) = config_path() {
            if let Err(e) = self.save_to(&path) {
                tracing::warn!("Failed to save settings to {}: {e}", path.display());
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = ViewerSettings::default();
        assert_eq!(s.viewer.camera_position, [5.0, 5.0, 5.0]);
        assert_eq!(s.viewer.environment, Environment::City);
        assert!(s.viewer.auto_center);
        assert_eq!(s.viewer.content(), ViewerContent::Placeholder);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut s = ViewerSettings::default();
        s.viewer.model = Some("https://example.com/a.glb".into());
        s.viewer.environment = Environment::Night;
        s.ui.language = Language::En;
        s.save_to(&path).unwrap();

        let loaded = ViewerSettings::load_from(&path);
        assert_eq!(loaded, s);
        assert_eq!(
            loaded.viewer.content(),
            ViewerContent::Model("https://example.com/a.glb".into())
        );
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "viewer": { "show_test_objects": false } }"#).unwrap();

        let loaded = ViewerSettings::load_from(&path);
        assert!(!loaded.viewer.show_test_objects);
        assert!(loaded.viewer.cast_shadow);
        assert_eq!(loaded.grid, GridSettings::default());
        assert_eq!(loaded.viewer.content(), ViewerContent::NoContent);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(ViewerSettings::load_from(&path), ViewerSettings::default());
    }

    #[test]
    fn test_broken_grid_sizes_are_replaced_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{ "grid": { "cell_size": 0.0, "section_size": -5.0, "fade_distance": 40.0 } }"#,
        )
        .unwrap();

        let grid = ViewerSettings::load_from(&path).grid;
        assert_eq!(grid.cell_size, 1.0);
        assert_eq!(grid.section_size, 5.0);
        assert_eq!(grid.fade_distance, 40.0);

        std::fs::write(&path, r#"{ "grid": { "cell_size": -2.0, "fade_distance": 0.0 } }"#).unwrap();
        let grid = ViewerSettings::load_from(&path).grid;
        assert_eq!(grid.cell_size, 1.0);
        assert_eq!(grid.fade_distance, 25.0);
    }

    #[test]
    fn test_tiny_cell_is_raised_to_minimum() {
        let grid = GridSettings {
            cell_size: 0.001,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(grid.cell_size, MIN_GRID_CELL);
        assert_eq!(grid.section_size, 5.0);
    }

    #[test]
    fn test_model_options_follow_config() {
        let config = ViewerConfig {
            cast_shadow: false,
            auto_center: false,
            ..Default::default()
        };
        let options = config.model_options();
        assert!(!options.cast_shadow);
        assert!(options.receive_shadow);
        assert!(!options.auto_center);
        assert_eq!(options.scale, 1.0);
    }
}
