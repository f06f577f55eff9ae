use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ViewerError;

/// Common slider metadata so bounds live in one place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl SliderRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

pub const NODE_RADIUS_RANGE: SliderRange =
    SliderRange::new(2.0, 32.0, 0.5);
pub const HIGHLIGHT_STROKE_RANGE: SliderRange =
    SliderRange::new(1.0, 8.0, 0.5);
pub const FIT_PADDING_RANGE: SliderRange =
    SliderRange::new(0.0, 0.5, 0.01);

pub const SETTINGS_FILE: &str = "viewer_settings.json";

/// Display preferences of the native viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub node_radius: f32,
    pub show_labels: bool,
    pub highlight_color: [u8; 3],
    pub highlight_stroke: f32,
    /// Margin kept around the graph when focusing a node
    pub fit_padding: f32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            node_radius: 6.0,
            show_labels: true,
            highlight_color: [180, 50, 60],
            highlight_stroke: 4.0,
            fit_padding: 0.1,
        }
    }
}

impl ViewerSettings {
    /// Pull every value back inside its slider bounds.
    pub fn clamped(mut self) -> Self {
        self.node_radius = NODE_RADIUS_RANGE.clamp(self.node_radius);
        self.highlight_stroke =
            HIGHLIGHT_STROKE_RANGE.clamp(self.highlight_stroke);
        self.fit_padding = FIT_PADDING_RANGE.clamp(self.fit_padding);
        self
    }

    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let json = std::fs::read_to_string(path)?;
        let settings: ViewerSettings = serde_json::from_str(&json)?;
        Ok(settings.clamped())
    }

    /// Settings from `path`, or the defaults if it is missing or
    /// unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "ignoring unreadable settings"
                );
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ViewerError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_save_and_load() {
        let temp_file =
            std::env::temp_dir().join("cex_viewer_settings_test.json");
        let settings = ViewerSettings {
            node_radius: 10.0,
            show_labels: false,
            ..ViewerSettings::default()
        };
        settings.save(&temp_file).expect("save settings");

        let loaded = ViewerSettings::load(&temp_file).unwrap();
        assert_eq!(loaded, settings);

        std::fs::remove_file(&temp_file).ok();
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let settings: ViewerSettings =
            serde_json::from_str(r#"{ "node_radius": 500.0 }"#).unwrap();
        let settings = settings.clamped();
        assert_eq!(settings.node_radius, NODE_RADIUS_RANGE.max);
        assert!(settings.show_labels);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("cex_viewer_no_such_file.json");
        assert_eq!(
            ViewerSettings::load_or_default(&path),
            ViewerSettings::default()
        );
    }
}
