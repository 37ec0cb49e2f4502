//! Outbound HTTP transport.
//!
//! The executor never talks to the network directly; it hands a finished
//! [`HttpRequest`] to a [`Transport`]. [`ReqwestTransport`] is the production
//! implementation, tests swap in doubles.

use super::config::ExecutionConfig;
use super::error::RequestError;
use crate::models::{response_size, HttpMethod, HttpRequest, HttpResponse};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

/// Sends one request and returns whatever came back.
///
/// A returned `Ok` means the server answered, whatever the status code.
/// `Err` means no response was obtained at all.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: &HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, RequestError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(
        &self,
        request: &HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, RequestError>> + Send {
        (**self).send(request)
    }
}

/// Transport backed by a reqwest client, built once per executor.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    default_headers: HashMap<String, String>,
}

impl ReqwestTransport {
    /// Builds the client from the execution settings.
    ///
    /// # Errors
    ///
    /// `RequestError::BuildError` if the TLS backend cannot be initialised.
    pub fn new(config: &ExecutionConfig) -> Result<Self, RequestError> {
        let redirect_policy = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        };

        let mut builder = reqwest::Client::builder()
            .redirect(redirect_policy)
            .danger_accept_invalid_certs(!config.validate_ssl);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| RequestError::BuildError(e.to_string()))?;

        Ok(Self {
            client,
            default_headers: config.default_headers.clone(),
        })
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        let url = parse_url(&request.url)?;
        let start_time = Instant::now();

        let mut req_builder = self.client.request(to_reqwest_method(request.method), url);

        for (name, value) in merge_headers(&self.default_headers, &request.headers) {
            req_builder = req_builder.header(name, value);
        }

        if let Some(body) = request.outgoing_body() {
            req_builder = req_builder.body(body.to_string());
        }

        log::debug!("[{}] {} {}", request.id, request.method, request.url);

        let response = req_builder.send().await.map_err(|e| {
            if e.is_connect() {
                RequestError::NetworkError(format!("Connection failed: {}", e))
            } else {
                RequestError::from(e)
            }
        })?;

        let status = response.status();
        let status_code = status.as_u16();
        let status_text = status.canonical_reason().unwrap_or("").to_string();

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value_str) = value.to_str() {
                headers.insert(name.as_str().to_string(), value_str.to_string());
            }
        }

        // A 204 carries no body worth reading.
        let body = if status_code == 204 {
            Vec::new()
        } else {
            response.bytes().await?.to_vec()
        };

        let duration = start_time.elapsed();
        let size = response_size(&headers, body.len());

        log::debug!(
            "[{}] {} in {}ms ({} bytes)",
            request.id,
            status_code,
            duration.as_millis(),
            size
        );

        Ok(HttpResponse {
            status_code,
            status_text,
            headers,
            body,
            duration,
            size,
        })
    }
}

/// Parses and checks the target URL.
///
/// Anything that is not an absolute http(s) URL is rejected here, before a
/// connection is attempted.
pub fn parse_url(raw: &str) -> Result<url::Url, RequestError> {
    let url = url::Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(RequestError::UnsupportedProtocol(other.to_string())),
    }
}

/// Merges configured default headers under the user's headers.
///
/// A default is dropped when the user set the same header name, compared
/// case-insensitively since both would otherwise go on the wire.
pub fn merge_headers(
    defaults: &HashMap<String, String>,
    user: &HashMap<String, String>,
) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = defaults
        .iter()
        .filter(|(name, _)| !user.keys().any(|k| k.eq_ignore_ascii_case(name)))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    merged.extend(user.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::DELETE => reqwest::Method::DELETE,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::HEAD => reqwest::Method::HEAD,
        HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
        HttpMethod::TRACE => reqwest::Method::TRACE,
        HttpMethod::CONNECT => reqwest::Method::CONNECT,
    }
}
