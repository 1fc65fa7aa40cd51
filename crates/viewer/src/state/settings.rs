//! Application settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::ShadingMode;

use super::selection::SelectionStyle;
use crate::build::Welder;

/// All application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppSettings {
    /// Selection alphas and shared-vertex behavior
    #[serde(default)]
    pub selection: SelectionStyle,
    /// Shading mode on startup and after a reset
    #[serde(default)]
    pub shading_mode: ShadingMode,
}

impl AppSettings {
    fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "slope-viewer", "slope-viewer")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the platform config dir, or return default if not found
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from a specific file. `None` if missing or unreadable.
    pub fn load_from(path: &Path) -> Option<Self> {
        let json = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!("Ignoring invalid settings file {}: {e}", path.display());
                None
            }
        }
    }

    /// Save settings to the platform config dir
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Err(e) = self.save_to(&path) {
                tracing::warn!("Failed to save settings to {}: {e}", path.display());
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Welder writing this configuration's base alpha
    pub fn welder(&self) -> Welder {
        Welder::new(self.selection.base_alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::selection::SharedVertexPolicy;

    #[test]
    fn test_defaults() {
        let s = AppSettings::default();
        assert_eq!(s.selection.base_alpha, 0.0);
        assert_eq!(s.selection.highlight_alpha, 1.0);
        assert_eq!(s.shading_mode, ShadingMode::Shaded);
        assert_eq!(s.welder().base_alpha, 0.0);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let mut s = AppSettings::default();
        s.selection.highlight_alpha = 0.6;
        s.selection.shared_vertices = SharedVertexPolicy::AnySelected;
        s.shading_mode = ShadingMode::FaceSelection;

        s.save_to(&path).unwrap();
        assert_eq!(AppSettings::load_from(&path), Some(s));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"shading_mode": "slope_heatmap"}"#).unwrap();
        let s = AppSettings::load_from(&path).unwrap();
        assert_eq!(s.shading_mode, ShadingMode::SlopeHeatmap);
        assert_eq!(s.selection, SelectionStyle::default());
    }

    #[test]
    fn test_invalid_file_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "nope").unwrap();
        assert!(AppSettings::load_from(&path).is_none());
        assert!(AppSettings::load_from(&dir.path().join("missing.json")).is_none());
    }
}
