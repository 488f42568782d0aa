//! Configuration system
//!
//! This module provides a trait-based configuration system that supports:
//! - Type-safe config structs via serde
//! - TOML file format
//! - Auto-generation of default configs
//! - Manual reload capability
//!
//! # Example
//!
//! ```ignore
//! use serde::{Deserialize, Serialize};
//! use commandqueue_core::AppConfig;
//!
//! #[derive(Default, Serialize, Deserialize)]
//! pub struct MyAppConfig {
//!     pub worker_threads: usize,
//! }
//!
//! impl AppConfig for MyAppConfig {
//!     const APP_NAME: &'static str = "my_app";
//! }
//!
//! let config = MyAppConfig::load().unwrap_or_default();
//! ```

mod loader;

use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub use loader::{app_config_path, base_dir, configs_dir, core_config_path, HOME_ENV};

/// Configuration system errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write config file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML content
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config to TOML
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Could not determine the config base directory
    #[error("Config directory not available - could not resolve base path")]
    NoConfigDirectory,
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Read a TOML config, writing `T::default()` there first if the file is missing
pub fn load_or_create<T>(path: &Path) -> ConfigResult<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    } else {
        let default = T::default();
        save_to(&default, path)?;
        tracing::info!("Created default config at {:?}", path);
        Ok(default)
    }
}

/// Write a config as TOML, creating parent directories as needed
pub fn save_to<T: Serialize>(config: &T, path: &Path) -> ConfigResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    tracing::debug!("Saved config to {:?}", path);
    Ok(())
}

fn read_from<T: DeserializeOwned>(path: &Path) -> ConfigResult<T> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    tracing::debug!("Reloaded config from {:?}", path);
    Ok(config)
}

/// Trait for application configuration types.
///
/// Implement this trait on your config struct to enable automatic loading,
/// saving, and reloading of configuration files.
///
/// # File Location
///
/// `{base}/configs/apps/{APP_NAME}/{APP_NAME}.toml`
pub trait AppConfig: Default + Serialize + DeserializeOwned + Send + Sync {
    /// The application name used for config file path resolution.
    const APP_NAME: &'static str;

    /// Load config from file, creating default if missing.
    fn load() -> ConfigResult<Self> {
        load_or_create(&app_config_path(Self::APP_NAME)?)
    }

    /// Save config to file.
    fn save(&self) -> ConfigResult<()> {
        save_to(self, &app_config_path(Self::APP_NAME)?)
    }

    /// Reload config from file.
    fn reload(&mut self) -> ConfigResult<()> {
        *self = read_from(&app_config_path(Self::APP_NAME)?)?;
        Ok(())
    }
}

/// Settings applied when building a [`CommandQueue`](crate::CommandQueue)
/// from configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Maximum backlog size; unbounded when absent
    pub limit: Option<usize>,

    /// Skip a command equal to the one delivered just before it
    pub distinct_only: bool,
}

/// Core configuration.
///
/// Loaded from `{base}/configs/core.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Config version for future migration support
    pub version: u32,

    /// Enable debug logging
    pub debug: bool,

    /// Queue settings
    pub queue: QueueConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            version: 1,
            debug: false,
            queue: QueueConfig::default(),
        }
    }
}

impl CoreConfig {
    /// Load core config from file, creating default if missing.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&core_config_path()?)
    }

    /// Load core config from an explicit path, creating default if missing.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        load_or_create(path)
    }

    /// Save core config to file.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&core_config_path()?)
    }

    /// Save core config to an explicit path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        save_to(self, path)
    }

    /// Reload core config from file.
    pub fn reload(&mut self) -> ConfigResult<()> {
        *self = read_from(&core_config_path()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("commandqueue-config-{}-{}", std::process::id(), name))
            .join("core.toml")
    }

    #[test]
    fn test_core_config_default() {
        let config = CoreConfig::default();
        assert_eq!(config.version, 1);
        assert!(!config.debug);
        assert_eq!(config.queue.limit, None);
        assert!(!config.queue.distinct_only);
    }

    #[test]
    fn test_core_config_serialize() {
        let config = CoreConfig {
            version: 2,
            debug: true,
            queue: QueueConfig {
                limit: Some(64),
                distinct_only: true,
            },
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("version = 2"));
        assert!(toml_str.contains("debug = true"));
        assert!(toml_str.contains("[queue]"));
        assert!(toml_str.contains("limit = 64"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: CoreConfig = toml::from_str("debug = true\n[queue]\nlimit = 8\n").unwrap();
        assert_eq!(config.version, 1);
        assert!(config.debug);
        assert_eq!(config.queue.limit, Some(8));
        assert!(!config.queue.distinct_only);
    }

    #[test]
    fn test_load_from_creates_default_then_reads_back() {
        let path = scratch_path("roundtrip");
        let _ = std::fs::remove_file(&path);

        let created = CoreConfig::load_from(&path).unwrap();
        assert_eq!(created, CoreConfig::default());
        assert!(path.exists());

        let edited = CoreConfig {
            debug: true,
            ..created
        };
        edited.save_to(&path).unwrap();
        assert_eq!(CoreConfig::load_from(&path).unwrap(), edited);

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let path = scratch_path("invalid");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "version = \"not a number\"").unwrap();

        let result = CoreConfig::load_from(&path);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
