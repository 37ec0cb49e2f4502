//! HTTP response data models.
//!
//! This module defines the data structure for a response as the transport
//! received it: status, headers, raw body bytes and elapsed time.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Represents an HTTP response received from a server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpResponse {
    /// HTTP status code (e.g., 200, 404, 500).
    pub status_code: u16,

    /// HTTP status text (e.g., "OK", "Not Found", "Internal Server Error").
    ///
    /// Human-readable description of the status code.
    pub status_text: String,

    /// Response headers as key-value pairs.
    pub headers: HashMap<String, String>,

    /// Response body as raw bytes.
    pub body: Vec<u8>,

    /// Time from sending the request to receiving the complete body.
    pub duration: Duration,

    /// Total response size in bytes (headers plus body).
    pub size: usize,
}

impl HttpResponse {
    /// Creates a new HttpResponse with the given status code and text.
    pub fn new(status_code: u16, status_text: String) -> Self {
        Self {
            status_code,
            status_text,
            headers: HashMap::new(),
            body: Vec::new(),
            duration: Duration::from_secs(0),
            size: 0,
        }
    }

    /// Checks if the response status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Checks if the response is 204 No Content.
    pub fn is_no_content(&self) -> bool {
        self.status_code == 204
    }

    /// Gets the Content-Type header value if present.
    ///
    /// Header names are compared case-insensitively.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Adds a header to the response.
    pub fn add_header(&mut self, name: String, value: String) {
        self.headers.insert(name, value);
    }

    /// Sets the response body and recomputes the size.
    pub fn set_body(&mut self, body: Vec<u8>) {
        self.size = response_size(&self.headers, body.len());
        self.body = body;
    }
}

/// Approximate wire size of a response: each header line plus the body.
pub fn response_size(headers: &HashMap<String, String>, body_len: usize) -> usize {
    // +4 for ": " and "\r\n"
    let headers_len: usize = headers.iter().map(|(k, v)| k.len() + v.len() + 4).sum();
    headers_len + body_len
}
