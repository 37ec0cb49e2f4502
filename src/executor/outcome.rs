//! Classification of what came back from a send.
//!
//! A send ends in exactly one [`Outcome`]: a 2xx response, any other
//! response, or no response at all. A response body is decoded once here,
//! according to its declared content type, so rendering and history work
//! from the same interpretation.

use super::error::RequestError;
use crate::formatter::content_type::{classify_content_type, ContentType};
use crate::history::EntryStatus;
use crate::models::HttpResponse;
use serde_json::Value;
use std::time::Duration;

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Declared JSON and parsed successfully.
    Json(Value),

    /// Not declared JSON; the text as received.
    Text(String),

    /// 204 No Content; the body was not read.
    NoContent,

    /// Declared JSON but did not parse. The server still answered, so this
    /// is a response outcome and never a network failure.
    MalformedJson { raw: String, error: String },
}

/// A response that arrived, whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedResponse {
    pub status_code: u16,
    pub status_text: String,
    pub content_type: ContentType,
    pub body: ResponseBody,
    pub duration: Duration,
    pub size: usize,
}

impl ReceivedResponse {
    /// Decodes the body of `response`.
    pub fn from_http_response(response: &HttpResponse) -> Self {
        let content_type = classify_content_type(response.content_type());

        let body = if response.is_no_content() {
            ResponseBody::NoContent
        } else if content_type == ContentType::Json {
            let raw = response.body_text();
            match serde_json::from_str::<Value>(&raw) {
                Ok(value) => ResponseBody::Json(value),
                Err(e) => ResponseBody::MalformedJson {
                    raw,
                    error: e.to_string(),
                },
            }
        } else {
            ResponseBody::Text(response.body_text())
        };

        Self {
            status_code: response.status_code,
            status_text: response.status_text.clone(),
            content_type,
            body,
            duration: response.duration,
            size: response.size,
        }
    }
}

/// The single result of one send.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A 2xx response.
    Success(ReceivedResponse),

    /// A response with any non-2xx status, redirects included.
    HttpError(ReceivedResponse),

    /// No response was obtained.
    NetworkFailure(RequestError),
}

impl Outcome {
    /// Classifies a received response purely by status code.
    pub fn from_response(response: &HttpResponse) -> Self {
        let received = ReceivedResponse::from_http_response(response);
        if response.is_success() {
            Outcome::Success(received)
        } else {
            Outcome::HttpError(received)
        }
    }

    /// Status to record in history.
    pub fn entry_status(&self) -> EntryStatus {
        match self {
            Outcome::Success(r) | Outcome::HttpError(r) => EntryStatus::Code(r.status_code),
            Outcome::NetworkFailure(_) => EntryStatus::NetworkFailure,
        }
    }

    /// The response, if one arrived.
    pub fn response(&self) -> Option<&ReceivedResponse> {
        match self {
            Outcome::Success(r) | Outcome::HttpError(r) => Some(r),
            Outcome::NetworkFailure(_) => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_network_failure(&self) -> bool {
        matches!(self, Outcome::NetworkFailure(_))
    }
}
