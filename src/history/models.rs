//! Data models for request history.
//!
//! A [`HistoryEntry`] records one completed request attempt: what was sent
//! and how it ended. Entries serialize with camelCase keys so the persisted
//! log stays a plain JSON array of flat objects.

use crate::models::{HttpMethod, HttpRequest};
use chrono::{SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Persisted in place of a status code when no response was received.
pub const NETWORK_FAILURE_SENTINEL: &str = "ERROR";

/// Sensitive header names that should be sanitized before storage.
///
/// These headers contain authentication tokens, cookies, and other
/// sensitive information.
pub const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
    "api-key",
    "auth-token",
    "x-auth-token",
    "access-token",
    "x-access-token",
    "bearer",
    "proxy-authorization",
];

/// How a recorded request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// A response arrived with this HTTP status code.
    Code(u16),

    /// No response was obtained at all.
    NetworkFailure,
}

impl EntryStatus {
    /// The numeric status, if a response was received.
    pub fn code(&self) -> Option<u16> {
        match self {
            EntryStatus::Code(code) => Some(*code),
            EntryStatus::NetworkFailure => None,
        }
    }

    /// Whether the request ended with a 2xx response.
    pub fn is_success(&self) -> bool {
        matches!(self, EntryStatus::Code(code) if (200..300).contains(code))
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Code(code) => write!(f, "{}", code),
            EntryStatus::NetworkFailure => write!(f, "{}", NETWORK_FAILURE_SENTINEL),
        }
    }
}

impl Serialize for EntryStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EntryStatus::Code(code) => serializer.serialize_u16(*code),
            EntryStatus::NetworkFailure => serializer.serialize_str(NETWORK_FAILURE_SENTINEL),
        }
    }
}

impl<'de> Deserialize<'de> for EntryStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(u16),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Code(code) => Ok(EntryStatus::Code(code)),
            Raw::Text(text) if text == NETWORK_FAILURE_SENTINEL => Ok(EntryStatus::NetworkFailure),
            Raw::Text(text) => Err(de::Error::custom(format!(
                "unknown status marker '{}'",
                text
            ))),
        }
    }
}

/// A single entry in the request history.
///
/// Entries are never mutated once stored; the store only inserts, evicts
/// and removes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// HTTP method that was sent.
    pub method: HttpMethod,

    /// Target URL, trimmed.
    pub url: String,

    /// Request headers; keys are unique.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Raw request body as typed, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Outcome status. Absent in entries recorded without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EntryStatus>,

    /// Reason phrase accompanying a numeric status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,

    /// When the entry was recorded, RFC 3339 UTC with milliseconds.
    #[serde(default)]
    pub date: String,
}

impl HistoryEntry {
    /// Creates an entry for `request` with no status yet and an empty date.
    ///
    /// The store stamps the date on append. Empty bodies are recorded as
    /// absent.
    pub fn from_request(request: &HttpRequest) -> Self {
        Self {
            method: request.method,
            url: request.url.clone(),
            headers: request.headers.clone(),
            body: request.body.clone().filter(|b| !b.is_empty()),
            status: None,
            status_text: None,
            date: String::new(),
        }
    }

    /// Records a received response.
    pub fn with_response(mut self, status_code: u16, status_text: impl Into<String>) -> Self {
        self.status = Some(EntryStatus::Code(status_code));
        self.status_text = Some(status_text.into()).filter(|t: &String| !t.is_empty());
        self
    }

    /// Records that no response was obtained.
    pub fn with_network_failure(mut self) -> Self {
        self.status = Some(EntryStatus::NetworkFailure);
        self.status_text = None;
        self
    }

    /// Current time in the format stored in [`HistoryEntry::date`].
    pub fn timestamp_now() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Whether the entry records a network failure.
    pub fn is_network_failure(&self) -> bool {
        self.status == Some(EntryStatus::NetworkFailure)
    }

    /// Compares two entries on every field except `date`.
    pub fn same_request_and_outcome(&self, other: &HistoryEntry) -> bool {
        self.method == other.method
            && self.url == other.url
            && self.headers == other.headers
            && self.body == other.body
            && self.status == other.status
            && self.status_text == other.status_text
    }

    /// Returns a copy without sensitive headers.
    pub fn sanitize_headers(&self) -> Self {
        let mut sanitized = self.clone();
        sanitized.headers.retain(|key, _| !is_sensitive_header(key));
        sanitized
    }
}

/// Whether `name` is one of [`SENSITIVE_HEADERS`], ignoring case.
pub fn is_sensitive_header(name: &str) -> bool {
    SENSITIVE_HEADERS
        .iter()
        .any(|sensitive| name.eq_ignore_ascii_case(sensitive))
}
