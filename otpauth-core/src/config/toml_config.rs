//! TOML configuration file I/O
//!
//! Handles loading and saving the configuration to/from TOML files in the
//! user's configuration directory.

use crate::config::OtpAuthConfig;
use crate::error::{ConfigError, OtpAuthError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default configuration file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Get the default configuration directory
///
/// Returns ~/.config/otpauth, or OTPAUTH_CONFIG_DIR if set
pub fn get_config_dir() -> Result<PathBuf, OtpAuthError> {
    if let Ok(config_dir) = std::env::var("OTPAUTH_CONFIG_DIR") {
        return Ok(PathBuf::from(config_dir));
    }

    let home = std::env::var("HOME").map_err(|_| {
        OtpAuthError::Config(ConfigError::IoError {
            message: "HOME environment variable not set".to_string(),
        })
    })?;

    Ok(PathBuf::from(home).join(".config").join("otpauth"))
}

/// Get the default configuration file path
pub fn get_config_path() -> Result<PathBuf, OtpAuthError> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load configuration from the default file
///
/// A missing default file is not an error: the defaults apply.
pub fn load_config() -> Result<OtpAuthConfig, OtpAuthError> {
    let config_path = get_config_path()?;
    if !config_path.exists() {
        debug!("No configuration file found, using defaults");
        return Ok(OtpAuthConfig::default());
    }
    load_config_from_path(&config_path)
}

/// Load configuration from a specific TOML file
pub fn load_config_from_path<P: AsRef<Path>>(path: P) -> Result<OtpAuthConfig, OtpAuthError> {
    let contents = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => OtpAuthError::Config(ConfigError::LoadFailed {
            path: path.as_ref().to_string_lossy().to_string(),
        }),
        _ => OtpAuthError::Config(ConfigError::IoError {
            message: format!("Failed to read config file: {}", e),
        }),
    })?;

    let config: OtpAuthConfig = toml::from_str(&contents)?;

    config
        .validate()
        .map_err(|e| OtpAuthError::Config(ConfigError::ValidationError { message: e }))?;

    info!(
        "Loaded configuration: time_step_ms={}, replay_cache_capacity={}, eviction={:?}",
        config.time_step_ms, config.replay_cache_capacity, config.eviction
    );

    Ok(config)
}

/// Save configuration to a specific TOML file
pub fn save_config_to_path<P: AsRef<Path>>(
    config: &OtpAuthConfig,
    path: P,
) -> Result<(), OtpAuthError> {
    config
        .validate()
        .map_err(|e| OtpAuthError::Config(ConfigError::ValidationError { message: e }))?;

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            OtpAuthError::Config(ConfigError::IoError {
                message: format!("Failed to create config directory: {}", e),
            })
        })?;
    }

    let contents = toml::to_string_pretty(config)?;

    std::fs::write(&path, contents).map_err(|_| {
        OtpAuthError::Config(ConfigError::SaveFailed {
            path: path.as_ref().to_string_lossy().to_string(),
        })
    })?;

    Ok(())
}
