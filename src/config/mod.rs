//! Configuration management.
//!
//! Configuration is read from a JSON file in the data directory and merged
//! with defaults. The loaded [`AppConfig`] is passed explicitly to whatever
//! needs it; there is no process-wide configuration singleton.

pub mod schema;

pub use schema::AppConfig;

use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Errors raised while loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    Io(std::io::Error),

    /// The merged configuration failed validation.
    Invalid(String),

    /// No home directory to derive the default data directory from.
    NoDataDir,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "Failed to read configuration: {}", err),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::NoDataDir => write!(f, "Could not determine home directory"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

/// Loads configuration from a JSON value.
///
/// User settings take precedence over defaults. Settings that fail to
/// deserialize are logged and the defaults are used instead; settings that
/// deserialize but fail validation are an error.
///
/// # Example
///
/// ```
/// use api_tester::config::load_config;
/// use serde_json::json;
///
/// let config = load_config(Some(json!({ "historyLimit": 20 }))).unwrap();
/// assert_eq!(config.history_limit, 20);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::default();

    if let Some(settings) = settings_json {
        match serde_json::from_value::<AppConfig>(settings) {
            Ok(user_config) => config = user_config,
            Err(e) => {
                log::warn!("Failed to parse settings: {}. Using defaults.", e);
            }
        }
    }

    config.validate().map_err(ConfigError::Invalid)?;

    Ok(config)
}

/// Loads configuration from a file.
///
/// A missing file yields the defaults. A file that is not JSON is treated
/// like unparseable settings: logged, defaults used.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        log::debug!("No configuration at {}, using defaults", path.display());
        return load_config(None);
    }

    let content = std::fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&content) {
        Ok(value) => load_config(Some(value)),
        Err(e) => {
            log::warn!(
                "Configuration at {} is not valid JSON ({}). Using defaults.",
                path.display(),
                e
            );
            load_config(None)
        }
    }
}

/// Gets the default data directory.
///
/// Returns `~/.config/api-tester` on Unix-like systems, or the equivalent
/// under `AppData/Roaming` on Windows.
pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
    let config_dir = if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".config")
    } else if let Some(user_profile) = std::env::var_os("USERPROFILE") {
        PathBuf::from(user_profile).join("AppData").join("Roaming")
    } else {
        return Err(ConfigError::NoDataDir);
    };

    Ok(config_dir.join("api-tester"))
}

/// Resolves the data directory: explicit override, then config, then default.
pub fn resolve_data_dir(
    override_dir: Option<PathBuf>,
    config: &AppConfig,
) -> Result<PathBuf, ConfigError> {
    match override_dir.or_else(|| config.data_dir.clone()) {
        Some(dir) => Ok(dir),
        None => default_data_dir(),
    }
}
