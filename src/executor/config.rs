//! HTTP request execution configuration.
//!
//! This module defines the options the transport is built with. They are
//! derived from the application configuration once, when the executor is
//! constructed.

use crate::config::AppConfig;
use std::collections::HashMap;
use std::time::Duration;

/// Configuration for HTTP request execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionConfig {
    /// Whole-request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,

    /// Whether 3xx responses are followed.
    pub follow_redirects: bool,

    /// Maximum number of redirects followed when following is enabled.
    pub max_redirects: usize,

    /// Whether TLS certificates are verified.
    pub validate_ssl: bool,

    /// Headers sent with every request unless the user sets the same key.
    pub default_headers: HashMap<String, String>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self::from_app_config(&AppConfig::default())
    }
}

impl ExecutionConfig {
    /// Creates an ExecutionConfig from the application configuration.
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout: config.timeout_duration(),
            follow_redirects: config.follow_redirects,
            max_redirects: config.max_redirects as usize,
            validate_ssl: config.validate_ssl,
            default_headers: config.default_headers.clone(),
        }
    }
}
