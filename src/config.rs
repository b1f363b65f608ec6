//! User settings, stored as JSON in the OS config directory.
//!
//! Every field has a default so a partial or hand-edited file still loads.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_NAME: &str = "RustTimelineEditor";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory available on this platform")]
    NoConfigDir,
    #[error("failed to access settings file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file '{path}' is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// flexi_logger spec string, e.g. `info` or `info,rust_timeline_editor=debug`.
    pub log_level: String,
    /// Interval of the periodic axis-label refresh.
    pub label_refresh_ms: u64,
    /// Task content longer than this is drawn in the compact style.
    pub long_content_threshold: usize,
    pub template_id: String,
    pub new_task_content: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            label_refresh_ms: 100,
            long_content_threshold: 20,
            template_id: "clean-default".into(),
            new_task_content: "New Task".into(),
        }
    }
}

impl Settings {
    pub fn label_refresh_interval(&self) -> Duration {
        Duration::from_millis(self.label_refresh_ms.max(1))
    }

    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        directories::ProjectDirs::from("", "", APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Directory for rolling log files.
    pub fn log_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.data_local_dir().join("logs"))
    }

    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join(SETTINGS_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)
    }

    /// Load from the default location; a missing file yields defaults, a
    /// broken one yields defaults and a warning.
    pub fn load_or_default() -> Self {
        let path = match Self::default_path() {
            Ok(path) => path,
            Err(err) => {
                warn!("event=settings_load module=config status=fallback reason={err}");
                return Self::default();
            }
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => {
                info!("event=settings_load module=config status=ok path={}", path.display());
                settings
            }
            Err(err) => {
                warn!("event=settings_load module=config status=fallback reason={err}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "label_refresh_ms": 250 }"#).unwrap();
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.label_refresh_ms, 250);
        assert_eq!(settings.long_content_threshold, 20);
        assert_eq!(settings.template_id, "clean-default");
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            template_id: "minimal-dark".into(),
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn broken_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(ConfigError::Json { .. })));
        assert!(matches!(
            Settings::load_from(&dir.path().join("missing.json")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn refresh_interval_is_never_zero() {
        let settings = Settings {
            label_refresh_ms: 0,
            ..Settings::default()
        };
        assert_eq!(settings.label_refresh_interval(), Duration::from_millis(1));
    }
}
