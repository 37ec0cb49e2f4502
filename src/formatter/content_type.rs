//! Content type classification.
//!
//! Only the declared `Content-Type` header decides how a body is treated;
//! the body itself is never sniffed. A body declared as JSON is parsed, any
//! other body is shown as text.

use serde::{Deserialize, Serialize};

/// Content type classification for HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    /// JSON data (application/json, application/problem+json, ...)
    Json,
    /// XML data (application/xml, text/xml)
    Xml,
    /// HTML content (text/html)
    Html,
    /// Plain text, or no declared type
    PlainText,
    /// Binary data (application/octet-stream, etc.)
    Binary,
    /// Image data (image/*)
    Image,
}

impl ContentType {
    /// Returns a human-readable string representation of the content type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Json => "JSON",
            ContentType::Xml => "XML",
            ContentType::Html => "HTML",
            ContentType::PlainText => "Plain Text",
            ContentType::Binary => "Binary",
            ContentType::Image => "Image",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifies a declared `Content-Type` header value.
///
/// Parameters such as `charset` are ignored. A missing or unrecognized
/// header is treated as plain text.
///
/// # Examples
///
/// ```
/// use api_tester::formatter::content_type::{classify_content_type, ContentType};
///
/// assert_eq!(classify_content_type(Some("application/json; charset=utf-8")), ContentType::Json);
/// assert_eq!(classify_content_type(None), ContentType::PlainText);
/// ```
pub fn classify_content_type(header: Option<&str>) -> ContentType {
    let Some(header) = header else {
        return ContentType::PlainText;
    };

    let lower = header.to_lowercase();
    let mime_type = lower.split(';').next().unwrap_or(&lower).trim();

    if mime_type.contains("json") {
        ContentType::Json
    } else if mime_type.contains("xml") {
        ContentType::Xml
    } else if mime_type.contains("html") {
        ContentType::Html
    } else if mime_type.starts_with("image/") {
        ContentType::Image
    } else if mime_type == "application/octet-stream"
        || mime_type.contains("pdf")
        || mime_type.contains("zip")
        || mime_type.contains("gzip")
    {
        ContentType::Binary
    } else {
        ContentType::PlainText
    }
}
