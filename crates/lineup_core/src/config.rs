//! # Board Configuration
//!
//! Every field has a default, so an empty document is a valid config.
//!
//! ```rust
//! use lineup_core::config::LineupConfig;
//!
//! let config = LineupConfig::from_yaml_str("team_name: Unidos FC\ngame_type: 7x7\n").unwrap();
//! assert_eq!(config.history_capacity, 50);
//! ```

use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::persistence::{FORMATIONS_KEY, HISTORY_KEY};
use crate::sync::CustomPlayerPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported config format: {path}")]
    UnsupportedFormat { path: String },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineupConfig {
    pub team_name: String,
    /// Squad size shown on first start
    pub game_type: String,
    pub history_capacity: usize,
    pub custom_player_policy: CustomPlayerPolicy,
    pub storage: StorageConfig,
    pub export: ExportConfig,
}

impl Default for LineupConfig {
    fn default() -> Self {
        Self {
            team_name: "Meu Time Pro".to_string(),
            game_type: "11x11".to_string(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            custom_player_policy: CustomPlayerPolicy::Drop,
            storage: StorageConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub formations_key: String,
    pub history_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { formations_key: FORMATIONS_KEY.to_string(), history_key: HISTORY_KEY.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Appended to the team name in the exported file name
    pub file_suffix: String,
    /// Pixel ratio handed to the renderer
    pub scale: f64,
    pub use_cors: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { file_suffix: "escalação".to_string(), scale: 2.0, use_cors: true }
    }
}

impl LineupConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        // An empty YAML document is `null`, which means "all defaults"
        let config: Option<Self> = serde_yaml::from_str(text)?;
        let config = config.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        let text = std::fs::read_to_string(path)?;

        match extension.as_deref() {
            Some("json") => Self::from_json_str(&text),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            _ => Err(ConfigError::UnsupportedFormat { path: path.display().to_string() }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=DEFAULT_HISTORY_CAPACITY).contains(&self.history_capacity) {
            return Err(ConfigError::Invalid(format!(
                "history_capacity must be between 1 and {}, got {}",
                DEFAULT_HISTORY_CAPACITY, self.history_capacity
            )));
        }
        if !(self.export.scale.is_finite() && self.export.scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "export.scale must be positive, got {}",
                self.export.scale
            )));
        }
        if self.storage.formations_key == self.storage.history_key {
            return Err(ConfigError::Invalid(
                "storage keys for formations and history must differ".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_documents_use_defaults() {
        assert_eq!(LineupConfig::from_json_str("{}").unwrap(), LineupConfig::default());
        assert_eq!(LineupConfig::from_yaml_str("").unwrap(), LineupConfig::default());
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let config = LineupConfig::from_yaml_str(
            "custom_player_policy: carry_forward\nexport:\n  file_suffix: lineup\n",
        )
        .unwrap();

        assert_eq!(config.custom_player_policy, CustomPlayerPolicy::CarryForward);
        assert_eq!(config.export.file_suffix, "lineup");
        assert_eq!(config.export.scale, 2.0);
        assert_eq!(config.team_name, "Meu Time Pro");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(matches!(
            LineupConfig::from_json_str(r#"{"history_capacity":0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            LineupConfig::from_json_str(r#"{"history_capacity":51}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(LineupConfig::from_json_str(r#"{"history_capacity":50}"#).is_ok());
        assert!(matches!(
            LineupConfig::from_json_str(r#"{"export":{"scale":-1.0}}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            LineupConfig::from_json_str(r#"{"storage":{"formations_key":"mtp_history"}}"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_from_path_picks_format_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let yaml = temp_dir.path().join("board.yml");
        std::fs::write(&yaml, "team_name: Unidos FC\n").unwrap();
        let toml = temp_dir.path().join("board.toml");
        std::fs::write(&toml, "team_name = 'x'\n").unwrap();

        assert_eq!(LineupConfig::from_path(&yaml).unwrap().team_name, "Unidos FC");
        assert!(matches!(
            LineupConfig::from_path(&toml),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
    }
}
