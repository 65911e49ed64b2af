//! Configuration file support for Vigil.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/vigil/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub devotion: DevotionConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Devotion sequencing parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DevotionConfig {
    /// Repetitions per item for the counted mystery sets.
    #[serde(default = "default_repeat_target")]
    pub repeat_target: u32,
}

impl Default for DevotionConfig {
    fn default() -> Self {
        Self {
            repeat_target: default_repeat_target(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("vigil")
}

fn default_repeat_target() -> u32 {
    crate::catalog::DEFAULT_REPEAT_TARGET
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        if config.devotion.repeat_target == 0 {
            return Err(Error::Config(
                "devotion.repeat_target must be at least 1".into(),
            ));
        }
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("vigil").join("config.toml")
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

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.devotion.repeat_target, 10);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(
            config.devotion.repeat_target,
            parsed.devotion.repeat_target
        );
        assert_eq!(config.data.data_dir, parsed.data.data_dir);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[devotion]
repeat_target = 3
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.devotion.repeat_target, 3);
        assert_eq!(config.data.data_dir, default_data_dir()); // default
    }

    #[test]
    fn test_zero_repeat_target_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[devotion]\nrepeat_target = 0\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
