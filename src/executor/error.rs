//! HTTP request execution error types.
//!
//! Two layers: [`RequestError`] is what a transport reports when it could not
//! obtain a response at all, and [`ExecuteError`] is what the executor itself
//! returns when it refuses to start. Everything a transport reports ends up
//! as a network-failure outcome, so only `ExecuteError` ever reaches callers.

use std::fmt;

/// Errors that prevent a response from being obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestError {
    /// Network error occurred during request execution.
    ///
    /// This includes connection failures, DNS resolution errors,
    /// and other network-level issues.
    NetworkError(String),

    /// Request timed out before completion.
    Timeout,

    /// The URL could not be parsed.
    InvalidUrl(String),

    /// TLS/SSL error occurred during HTTPS connection.
    TlsError(String),

    /// The request could not be constructed (bad header name or value, etc.).
    BuildError(String),

    /// Only HTTP and HTTPS are supported.
    UnsupportedProtocol(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            RequestError::Timeout => write!(f, "Request timed out"),
            RequestError::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            RequestError::TlsError(msg) => write!(f, "TLS/SSL error: {}", msg),
            RequestError::BuildError(msg) => write!(f, "Request build error: {}", msg),
            RequestError::UnsupportedProtocol(protocol) => {
                write!(f, "Unsupported protocol: {}", protocol)
            }
        }
    }
}

impl std::error::Error for RequestError {}

/// Convert reqwest errors to RequestError.
impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RequestError::Timeout
        } else if err.is_builder() {
            RequestError::BuildError(err.to_string())
        } else if err.to_string().contains("certificate")
            || err.to_string().contains("TLS")
            || err.to_string().contains("SSL")
        {
            RequestError::TlsError(err.to_string())
        } else {
            RequestError::NetworkError(err.to_string())
        }
    }
}

impl From<url::ParseError> for RequestError {
    fn from(err: url::ParseError) -> Self {
        RequestError::InvalidUrl(err.to_string())
    }
}

/// Reasons the executor rejects a send before any network attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecuteError {
    /// The composed input is unusable (empty URL).
    InvalidInput(String),
}

impl fmt::Display for ExecuteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecuteError::InvalidInput(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ExecuteError {}
