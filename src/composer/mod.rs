//! Request composer state.
//!
//! Holds what the user is typing: a method, a URL, a list of header rows and
//! a body. The composer turns that into an [`HttpRequest`] for the executor,
//! and is refilled from a history entry on replay.

use crate::executor::ExecuteError;
use crate::history::HistoryEntry;
use crate::models::{HttpMethod, HttpRequest};
use std::collections::HashMap;

/// Warning shown when a send is attempted without a URL.
pub const EMPTY_URL_WARNING: &str = "Please enter a URL";

/// Header presets offered next to the header rows, as `Key: Value`.
pub const COMMON_HEADERS: &[&str] = &[
    "Content-Type: application/json",
    "Content-Type: application/x-www-form-urlencoded",
    "Content-Type: text/plain",
    "Accept: application/json",
    "Accept: */*",
    "Authorization: Bearer ",
    "Cache-Control: no-cache",
];

/// One key/value row of the header editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderRow {
    pub key: String,
    pub value: String,
}

impl HeaderRow {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The composer's current inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerInputs {
    pub method: HttpMethod,
    pub url: String,
    pub header_rows: Vec<HeaderRow>,
    pub body: String,
}

impl Default for ComposerInputs {
    fn default() -> Self {
        Self {
            method: HttpMethod::GET,
            url: String::new(),
            header_rows: vec![HeaderRow::default()],
            body: String::new(),
        }
    }
}

impl ComposerInputs {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Refills the inputs from a recorded entry.
    ///
    /// Rows are sorted by key for a stable layout; an entry without headers
    /// still yields one empty row to type into.
    pub fn from_entry(entry: &HistoryEntry) -> Self {
        let mut header_rows: Vec<HeaderRow> = entry
            .headers
            .iter()
            .map(|(k, v)| HeaderRow::new(k.clone(), v.clone()))
            .collect();
        header_rows.sort_by(|a, b| a.key.cmp(&b.key));

        if header_rows.is_empty() {
            header_rows.push(HeaderRow::default());
        }

        Self {
            method: entry.method,
            url: entry.url.clone(),
            header_rows,
            body: entry.body.clone().unwrap_or_default(),
        }
    }

    /// Appends a header row.
    pub fn add_header_row(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.header_rows.push(HeaderRow::new(key, value));
    }

    /// Removes the header row at `index`. Returns `false` when out of range.
    pub fn remove_header_row(&mut self, index: usize) -> bool {
        if index < self.header_rows.len() {
            self.header_rows.remove(index);
            true
        } else {
            false
        }
    }

    /// Adds a row from a `Key: Value` preset.
    ///
    /// Splits on the first colon and trims both halves. Returns `false` for
    /// a preset without a key.
    pub fn add_preset(&mut self, preset: &str) -> bool {
        let (key, value) = match preset.split_once(':') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (preset.trim(), ""),
        };

        if key.is_empty() {
            return false;
        }

        self.add_header_row(key, value);
        true
    }

    /// Collects header rows into a map.
    ///
    /// Keys and values are trimmed, rows with an empty key are skipped, and a
    /// later row replaces an earlier one with the exact same key.
    pub fn collect_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        for row in &self.header_rows {
            let key = row.key.trim();
            if key.is_empty() {
                continue;
            }
            headers.insert(key.to_string(), row.value.trim().to_string());
        }
        headers
    }

    /// Builds the outbound request.
    ///
    /// # Errors
    ///
    /// `ExecuteError::InvalidInput` when the URL is empty after trimming.
    pub fn to_request(&self) -> Result<HttpRequest, ExecuteError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ExecuteError::InvalidInput(EMPTY_URL_WARNING.to_string()));
        }

        let mut request = HttpRequest::new(self.method, url);
        request.headers = self.collect_headers();
        if !self.body.is_empty() {
            request.set_body(self.body.clone());
        }

        Ok(request)
    }
}
