//! Configuration file support for Forge.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/forge/config.toml`.

use crate::{Error, OptimizerConfig, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub optimizer: OptimizerConfig,

    #[serde(default)]
    pub data: DataConfig,
}

/// Locations of the read-only input snapshots
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,

    #[serde(default = "default_context_path")]
    pub context_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            history_path: default_history_path(),
            context_path: default_context_path(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("forge")
}

fn default_history_path() -> PathBuf {
    default_data_dir().join("history.jsonl")
}

fn default_context_path() -> PathBuf {
    default_data_dir().join("context.json")
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("forge")
            .join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MuscleGroup, RepRangePreference};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.optimizer.enabled);
        assert_eq!(config.optimizer.max_sets_per_session, 20);
        assert_eq!(config.optimizer.deload_frequency_weeks, 5);
        assert_eq!(
            config.optimizer.target_sets_per_muscle_group[&MuscleGroup::Chest],
            10
        );
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.optimizer.rep_range_preference = RepRangePreference::Low;
        config.save_to(&path).unwrap();

        let parsed = Config::load_from(&path).unwrap();
        assert_eq!(parsed.optimizer, config.optimizer);
        assert_eq!(parsed.data.history_path, config.data.history_path);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[optimizer]
max_sets_per_session = 14
rep_range_preference = "high"

[optimizer.target_sets_per_muscle_group]
calves = 8
Quadriceps = 12
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.optimizer.max_sets_per_session, 14);
        assert_eq!(config.optimizer.rep_range_preference, RepRangePreference::High);
        assert!(config.optimizer.auto_deload); // default
        assert_eq!(config.optimizer.target_sets_per_muscle_group.len(), 2);
        assert_eq!(
            config.optimizer.target_sets_per_muscle_group[&MuscleGroup::Quads],
            12
        );
    }

    #[test]
    fn test_negative_values_parse_then_fail_validation() {
        let toml_str = r#"
[optimizer]
max_sets_per_session = -2
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(matches!(config.optimizer.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_unknown_muscle_is_rejected() {
        let toml_str = r#"
[optimizer.target_sets_per_muscle_group]
spleen = 4
"#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }
}
