//! HTTP request data models.
//!
//! This module defines the data structures for an outbound request as the
//! composer hands it to the executor: method, URL, headers and body.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// HTTP request method.
///
/// Represents all standard HTTP methods as defined in RFC 7231 and RFC 5789.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    #[default]
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
    /// HTTP OPTIONS method - describe communication options
    OPTIONS,
    /// HTTP HEAD method - retrieve headers only
    HEAD,
    /// HTTP TRACE method - perform a message loop-back test
    TRACE,
    /// HTTP CONNECT method - establish a tunnel to the server
    CONNECT,
}

impl HttpMethod {
    /// Every method offered by the composer, in display order.
    pub const ALL: [HttpMethod; 9] = [
        HttpMethod::GET,
        HttpMethod::POST,
        HttpMethod::PUT,
        HttpMethod::PATCH,
        HttpMethod::DELETE,
        HttpMethod::HEAD,
        HttpMethod::OPTIONS,
        HttpMethod::TRACE,
        HttpMethod::CONNECT,
    ];

    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::TRACE => "TRACE",
            HttpMethod::CONNECT => "CONNECT",
        }
    }

    /// Parses a method token, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for an empty or unknown token.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "DELETE" => Some(HttpMethod::DELETE),
            "PATCH" => Some(HttpMethod::PATCH),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            "HEAD" => Some(HttpMethod::HEAD),
            "TRACE" => Some(HttpMethod::TRACE),
            "CONNECT" => Some(HttpMethod::CONNECT),
            _ => None,
        }
    }

    /// Whether a composed body is sent with this method.
    ///
    /// GET is the only no-body method; every other verb carries the body
    /// when one was typed.
    pub fn sends_body(&self) -> bool {
        *self != HttpMethod::GET
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An outbound HTTP request, ready for the executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpRequest {
    /// Unique identifier for this invocation.
    ///
    /// Tags the outcome so overlapping sends can be told apart.
    pub id: String,

    /// HTTP method (GET, POST, PUT, DELETE, etc.).
    pub method: HttpMethod,

    /// Target URL, already trimmed.
    pub url: String,

    /// Request headers as key-value pairs.
    ///
    /// Keys are matched as exact strings; a later row with the same key
    /// replaces an earlier one.
    pub headers: HashMap<String, String>,

    /// Optional request body, as typed.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Creates a new request with a fresh UUID v4 identifier.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Adds a header to the request.
    pub fn add_header(&mut self, name: String, value: String) {
        self.headers.insert(name, value);
    }

    /// Sets the request body.
    pub fn set_body(&mut self, body: String) {
        self.body = Some(body);
    }

    /// Checks if the request has a non-empty body.
    pub fn has_body(&self) -> bool {
        self.body.as_ref().map_or(false, |b| !b.is_empty())
    }

    /// The body that actually goes on the wire.
    ///
    /// `None` for GET, and for any method when the body is absent or empty.
    pub fn outgoing_body(&self) -> Option<&str> {
        if self.method.sends_body() && self.has_body() {
            self.body.as_deref()
        } else {
            None
        }
    }
}
