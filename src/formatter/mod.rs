//! Result rendering.
//!
//! Turns an [`Outcome`] into the [`RenderedResult`] the result pane shows:
//! a status line, a body text, and whether this was a success, an HTTP
//! error or a network failure.

pub mod content_type;
pub mod json;

pub use content_type::{classify_content_type, ContentType};
pub use json::{format_json_pretty, format_value_pretty};

use crate::executor::{Outcome, ReceivedResponse, ResponseBody};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Default file name for an exported response body.
pub const DEFAULT_EXPORT_FILE: &str = "response.json";

/// Body shown for a 204 response.
pub const NO_CONTENT_MESSAGE: &str = "Request succeeded (204 No Content)";

/// Errors that can occur during formatting or export.
#[derive(Debug)]
pub enum FormatError {
    /// JSON parsing or formatting error.
    JsonError(String),

    /// UTF-8 encoding error.
    EncodingError(String),

    /// No response body to export.
    NothingToExport,

    /// Writing the export failed.
    Io(std::io::Error),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::JsonError(msg) => write!(f, "JSON formatting error: {}", msg),
            FormatError::EncodingError(msg) => write!(f, "Encoding error: {}", msg),
            FormatError::NothingToExport => write!(f, "No response to export"),
            FormatError::Io(err) => write!(f, "Failed to write response: {}", err),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FormatError {
    fn from(err: std::io::Error) -> Self {
        FormatError::Io(err)
    }
}

/// Which class of outcome a rendered result shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Success,
    HttpError,
    NetworkFailure,
}

/// What the result pane displays for one send.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResult {
    /// Identifier of the send this result belongs to.
    pub request_id: String,

    pub kind: ResultKind,

    /// e.g. "200 OK", or "Network error" when nothing came back.
    pub status_line: String,

    /// Pretty-printed JSON, raw text, or the error message.
    pub body: String,

    /// Declared content type of the response, if one arrived.
    pub content_type: Option<ContentType>,

    /// Notice shown above the body, e.g. for malformed JSON.
    pub notice: Option<String>,

    pub duration: Option<Duration>,

    pub size: Option<usize>,
}

impl RenderedResult {
    pub fn is_error(&self) -> bool {
        self.kind != ResultKind::Success
    }

    /// Whether there is a response body worth exporting.
    pub fn has_response(&self) -> bool {
        self.kind != ResultKind::NetworkFailure
    }

    /// Creates a complete result string for display.
    pub fn to_display_string(&self) -> String {
        let mut output = String::new();

        let marker = match self.kind {
            ResultKind::Success => "✅",
            ResultKind::HttpError => "⚠️",
            ResultKind::NetworkFailure => "❌",
        };
        output.push_str(&format!("{} {}\n", marker, self.status_line));

        if let (Some(duration), Some(size), Some(content_type)) =
            (self.duration, self.size, self.content_type)
        {
            output.push_str(&format!(
                "Duration: {} | Size: {} | Type: {}\n",
                format_duration(duration),
                format_size(size),
                content_type.as_str()
            ));
        }

        if let Some(notice) = &self.notice {
            output.push_str(&format!("{}\n", notice));
        }

        output.push_str("\n---\n\n");
        output.push_str(&self.body);

        output
    }
}

/// Renders an outcome for display.
pub fn render_outcome(request_id: &str, outcome: &Outcome) -> RenderedResult {
    match outcome {
        Outcome::Success(response) => render_response(request_id, ResultKind::Success, response),
        Outcome::HttpError(response) => {
            render_response(request_id, ResultKind::HttpError, response)
        }
        Outcome::NetworkFailure(error) => RenderedResult {
            request_id: request_id.to_string(),
            kind: ResultKind::NetworkFailure,
            status_line: "Network error".to_string(),
            body: format!("Error: {}", error),
            content_type: None,
            notice: None,
            duration: None,
            size: None,
        },
    }
}

fn render_response(request_id: &str, kind: ResultKind, response: &ReceivedResponse) -> RenderedResult {
    let (body, notice) = match &response.body {
        ResponseBody::Json(value) => match format_value_pretty(value) {
            Ok(pretty) => (pretty, None),
            Err(e) => (value.to_string(), Some(e.to_string())),
        },
        ResponseBody::Text(text) => (text.clone(), None),
        ResponseBody::NoContent => (NO_CONTENT_MESSAGE.to_string(), None),
        ResponseBody::MalformedJson { raw, error } => (
            raw.clone(),
            Some(format!("Response declared JSON but is malformed: {}", error)),
        ),
    };

    let status_line = if response.status_text.is_empty() {
        response.status_code.to_string()
    } else {
        format!("{} {}", response.status_code, response.status_text)
    };

    RenderedResult {
        request_id: request_id.to_string(),
        kind,
        status_line,
        body,
        content_type: Some(response.content_type),
        notice,
        duration: Some(response.duration),
        size: Some(response.size),
    }
}

/// Writes the rendered response body to `path`.
///
/// # Errors
///
/// `FormatError::NothingToExport` when the send produced no response.
pub fn export_result(result: &RenderedResult, path: &Path) -> Result<(), FormatError> {
    if !result.has_response() {
        return Err(FormatError::NothingToExport);
    }

    std::fs::write(path, result.body.as_bytes())?;
    log::debug!("Exported response body to {}", path.display());
    Ok(())
}

/// Formats a duration like "567ms" or "1.234s".
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.3}s", duration.as_secs_f64())
    }
}

/// Formats a byte count like "456 B" or "1.23 KB".
pub fn format_size(size: usize) -> String {
    if size < 1024 {
        format!("{} B", size)
    } else if size < 1024 * 1024 {
        format!("{:.2} KB", size as f64 / 1024.0)
    } else {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    }
}
