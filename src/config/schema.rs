//! Configuration schema for the API tester.
//!
//! This module defines the configuration structure and validation logic for all
//! user-configurable settings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Main configuration structure.
///
/// Read from `config.json` in the data directory. Missing settings fall back
/// to defaults; invalid ones are rejected by [`AppConfig::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Maximum number of requests kept in history. Defaults to 50.
    ///
    /// Must be > 0.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Request timeout in milliseconds.
    ///
    /// When unset the transport's own default applies.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Whether to automatically follow HTTP redirects. Defaults to true.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,

    /// Maximum number of redirects to follow. Defaults to 10.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,

    /// Whether to validate SSL/TLS certificates. Defaults to true.
    ///
    /// **Warning:** Disabling SSL validation can expose you to security risks.
    #[serde(default = "default_validate_ssl")]
    pub validate_ssl: bool,

    /// Headers added to every request unless the composer sets the same key.
    #[serde(default = "default_headers")]
    pub default_headers: HashMap<String, String>,

    /// Drop authorization, cookie and API key headers before history is
    /// persisted. Off by default because replay needs them.
    #[serde(default)]
    pub sanitize_sensitive_headers: bool,

    /// Overrides the directory holding history, theme and the asset cache.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            timeout_ms: None,
            follow_redirects: default_follow_redirects(),
            max_redirects: default_max_redirects(),
            validate_ssl: default_validate_ssl(),
            default_headers: default_headers(),
            sanitize_sensitive_headers: false,
            data_dir: None,
        }
    }
}

impl AppConfig {
    /// Validates the configuration and returns errors if any settings are invalid.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` with a descriptive error message.
    pub fn validate(&self) -> Result<(), String> {
        if self.history_limit == 0 {
            return Err("historyLimit must be greater than 0".to_string());
        }

        if self.timeout_ms == Some(0) {
            return Err("timeoutMs must be greater than 0".to_string());
        }

        // max_redirects can be 0 (no redirects), so no validation needed

        Ok(())
    }

    /// Returns the configured timeout, if any.
    pub fn timeout_duration(&self) -> Option<std::time::Duration> {
        self.timeout_ms.map(std::time::Duration::from_millis)
    }
}

// Default value functions for serde

fn default_history_limit() -> usize {
    crate::history::DEFAULT_HISTORY_LIMIT
}

fn default_follow_redirects() -> bool {
    true
}

fn default_max_redirects() -> u32 {
    10
}

fn default_validate_ssl() -> bool {
    true
}

fn default_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert(
        "User-Agent".to_string(),
        format!("api-tester/{}", env!("CARGO_PKG_VERSION")),
    );
    headers
}
