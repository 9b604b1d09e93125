//! Configuration for the annotation viewer.
//!
//! Supports JSON and TOML file formats stored in platform-specific
//! directories. Configuration is organized into sections:
//! - Engine tuning (size floors, hit tolerances, placement defaults)
//! - Persistence (debounce window, file store location)
//! - UI preferences (palette, initial visibility)

use std::path::{Path, PathBuf};
use std::time::Duration;

use annotkit_engine::{Color, EngineConfig, PALETTE};
use serde::{Deserialize, Serialize};

use crate::error::{SettingsError, SettingsResult};

const APP_DIR: &str = "annotkit";

fn platform_dir(base: Option<PathBuf>) -> PathBuf {
    base.or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Persistence settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceSettings {
    /// Quiet period before a debounced save
    pub debounce_ms: u64,
    /// Directory of the file store (`<passkey>.json` files)
    pub store_dir: PathBuf,
}

impl Default for PersistenceSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 1000,
            store_dir: platform_dir(dirs::data_dir()).join("annotations"),
        }
    }
}

/// UI preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Toolbar palette as `#rrggbb` strings
    pub palette: Vec<String>,
    /// Whether annotations are shown when a viewer opens
    pub annotations_visible: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            palette: PALETTE.iter().map(Color::to_hex).collect(),
            annotations_visible: true,
        }
    }
}

/// Complete viewer configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub persistence: PersistenceSettings,
    pub ui: UiSettings,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/annotkit/config.toml`
    pub fn default_path() -> PathBuf {
        platform_dir(dirs::config_dir()).join("config.toml")
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => return Err(SettingsError::UnsupportedFormat(other.unwrap_or("").to_string())),
        };

        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => return Err(SettingsError::UnsupportedFormat(other.unwrap_or("").to_string())),
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.engine
            .validate()
            .map_err(|reason| SettingsError::invalid("engine", reason))?;

        if self.persistence.debounce_ms == 0 {
            return Err(SettingsError::invalid(
                "persistence.debounce_ms",
                "must be > 0",
            ));
        }

        if self.ui.palette.is_empty() {
            return Err(SettingsError::invalid("ui.palette", "must not be empty"));
        }
        self.palette_colors()?;

        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.persistence.debounce_ms)
    }

    /// Parsed toolbar palette.
    pub fn palette_colors(&self) -> SettingsResult<Vec<Color>> {
        self.ui
            .palette
            .iter()
            .map(|hex| {
                Color::from_hex(hex).map_err(|e| SettingsError::invalid("ui.palette", e.to_string()))
            })
            .collect()
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.debounce(), Duration::from_millis(1000));
        assert_eq!(config.palette_colors().unwrap(), PALETTE.to_vec());
        assert!(Config::default_path().ends_with("annotkit/config.toml"));
    }

    #[test]
    fn test_rejects_bad_palette_entry() {
        let mut config = Config::default();
        config.ui.palette.push("#12345".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ui.palette"));
    }

    #[test]
    fn test_rejects_zero_debounce() {
        let mut config = Config::default();
        config.persistence.debounce_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[engine]\nmin_size = 4.0\n").unwrap();
        assert_eq!(config.engine.min_size, 4.0);
        assert_eq!(config.engine.hit_threshold, 5.0);
        assert!(config.ui.annotations_visible);
    }
}
