//! Config path resolution
//!
//! Config files live under a base directory: `$COMMANDQUEUE_HOME` when set,
//! otherwise the directory containing the running executable.

use std::path::PathBuf;

use super::{ConfigError, ConfigResult};

/// Environment variable overriding the base directory
pub const HOME_ENV: &str = "COMMANDQUEUE_HOME";

/// Returns the base directory for configuration.
pub fn base_dir() -> ConfigResult<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }

    let exe = std::env::current_exe().map_err(ConfigError::IoError)?;
    exe.parent()
        .map(PathBuf::from)
        .ok_or(ConfigError::NoConfigDirectory)
}

/// Returns the base configs directory.
///
/// Path: `{base}/configs/`
pub fn configs_dir() -> ConfigResult<PathBuf> {
    Ok(base_dir()?.join("configs"))
}

/// Returns the path for an application's config file.
///
/// Path: `{base}/configs/apps/{app_name}/{app_name}.toml`
pub fn app_config_path(app_name: &str) -> ConfigResult<PathBuf> {
    Ok(app_config_path_in(configs_dir()?, app_name))
}

fn app_config_path_in(configs: PathBuf, app_name: &str) -> PathBuf {
    configs
        .join("apps")
        .join(app_name)
        .join(format!("{}.toml", app_name))
}

/// Returns the core config path.
///
/// Path: `{base}/configs/core.toml`
pub fn core_config_path() -> ConfigResult<PathBuf> {
    Ok(configs_dir()?.join("core.toml"))
}
