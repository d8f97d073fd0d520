//! Persisted chart settings and on-disk locations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::HangarResult;
use crate::model::TimelineGeometry;
use crate::viewport::RowLayout;

/// User-tunable chart layout (lives in the OS config directory).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Pixels per day column.
    pub day_width: f32,
    pub row_height: f32,
    pub header_height: f32,
    /// Rows rendered beyond each edge of the viewport.
    pub buffer: usize,
    pub sidebar_width: f32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            day_width: 60.0,
            row_height: 48.0,
            header_height: 56.0,
            buffer: 5,
            sidebar_width: 220.0,
        }
    }
}

/// Day-column width bounds and step for zooming.
pub const MIN_DAY_WIDTH: f32 = 20.0;
pub const MAX_DAY_WIDTH: f32 = 160.0;
const ZOOM_FACTOR: f32 = 1.2;

impl ChartSettings {
    pub fn zoom_in(&mut self) {
        self.day_width = (self.day_width * ZOOM_FACTOR).min(MAX_DAY_WIDTH);
    }

    pub fn zoom_out(&mut self) {
        self.day_width = (self.day_width / ZOOM_FACTOR).max(MIN_DAY_WIDTH);
    }

    pub fn geometry(&self) -> TimelineGeometry {
        TimelineGeometry {
            day_width: self.day_width,
            row_height: self.row_height,
            header_height: self.header_height,
        }
    }

    pub fn row_layout(&self) -> RowLayout {
        RowLayout {
            row_height: self.row_height,
            header_height: self.header_height,
            buffer: self.buffer,
        }
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// unreadable.
    pub fn load(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> HangarResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Where settings and the schedule state file live.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl AppPaths {
    pub fn discover() -> Self {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "HangarGantt") {
            Self {
                config_dir: proj_dirs.config_dir().to_path_buf(),
                data_dir: proj_dirs.data_dir().to_path_buf(),
            }
        } else {
            // Fallback
            let dir = PathBuf::from(".");
            Self {
                config_dir: dir.clone(),
                data_dir: dir,
            }
        }
    }

    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    pub fn state_file(&self) -> PathBuf {
        self.data_dir.join("schedule.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_fill_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "day_width": 40.0 }"#).unwrap();

        let settings = ChartSettings::load(&path);
        assert_eq!(settings.day_width, 40.0);
        assert_eq!(settings.row_height, 48.0);
        assert_eq!(settings.buffer, 5);
    }

    #[test]
    fn malformed_or_missing_settings_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(ChartSettings::load(&path), ChartSettings::default());

        std::fs::write(&path, "not json").unwrap();
        assert_eq!(ChartSettings::load(&path), ChartSettings::default());
    }

    #[test]
    fn zoom_is_bounded() {
        let mut settings = ChartSettings::default();
        settings.zoom_in();
        assert!(settings.day_width > 60.0);
        for _ in 0..20 {
            settings.zoom_in();
        }
        assert_eq!(settings.day_width, MAX_DAY_WIDTH);
        for _ in 0..40 {
            settings.zoom_out();
        }
        assert_eq!(settings.day_width, MIN_DAY_WIDTH);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = ChartSettings { buffer: 8, ..ChartSettings::default() };
        settings.save(&path).unwrap();
        assert_eq!(ChartSettings::load(&path), settings);
        assert_eq!(settings.row_layout().buffer, 8);
    }
}
