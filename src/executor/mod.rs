//! HTTP request executor.
//!
//! Performs exactly one outbound request per invocation and turns whatever
//! happens into exactly one [`Outcome`]: the outcome is rendered once and
//! recorded once in the shared history.
//!
//! Only an unusable input (an empty URL) is reported as an error, and in
//! that case nothing is sent and nothing is recorded. Every transport
//! failure becomes a [`Outcome::NetworkFailure`].
//!
//! Overlapping invocations are allowed. Each carries its own request id, and
//! history appends are serialized by the store's mutex, which is never held
//! while a request is in flight.

pub mod config;
pub mod error;
pub mod outcome;
pub mod transport;

pub use config::ExecutionConfig;
pub use error::{ExecuteError, RequestError};
pub use outcome::{Outcome, ReceivedResponse, ResponseBody};
pub use transport::{ReqwestTransport, Transport};

use crate::composer::{ComposerInputs, EMPTY_URL_WARNING};
use crate::formatter::{render_outcome, RenderedResult};
use crate::history::{update_shared, HistoryEntry, SharedHistory};
use crate::models::HttpRequest;
use crate::storage::SlotStore;

/// Everything one invocation produced.
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    /// Identifier of this invocation.
    pub request_id: String,

    pub outcome: Outcome,

    /// The single render of the outcome.
    pub rendered: RenderedResult,

    /// The entry appended to history.
    pub entry: HistoryEntry,
}

/// Sends composed requests and records them.
pub struct Executor<T: Transport, P: SlotStore> {
    transport: T,
    history: SharedHistory<P>,
}

impl<T: Transport, P: SlotStore> Executor<T, P> {
    pub fn new(transport: T, history: SharedHistory<P>) -> Self {
        Self { transport, history }
    }

    /// The history this executor records into.
    pub fn history(&self) -> &SharedHistory<P> {
        &self.history
    }

    /// Builds a request from the composer inputs and executes it.
    ///
    /// # Errors
    ///
    /// `ExecuteError::InvalidInput` when the URL is empty or only whitespace.
    /// No request is sent and no history entry is written.
    pub async fn execute(&self, inputs: &ComposerInputs) -> Result<ExecutionReport, ExecuteError> {
        let request = inputs.to_request()?;
        self.execute_request(request).await
    }

    /// Executes an already built request.
    ///
    /// # Errors
    ///
    /// `ExecuteError::InvalidInput` when the URL is empty or only whitespace.
    pub async fn execute_request(
        &self,
        mut request: HttpRequest,
    ) -> Result<ExecutionReport, ExecuteError> {
        let trimmed = request.url.trim();
        if trimmed.is_empty() {
            return Err(ExecuteError::InvalidInput(EMPTY_URL_WARNING.to_string()));
        }
        if trimmed.len() != request.url.len() {
            request.url = trimmed.to_string();
        }

        let outcome = match self.transport.send(&request).await {
            Ok(response) => Outcome::from_response(&response),
            Err(e) => {
                log::debug!("[{}] no response: {}", request.id, e);
                Outcome::NetworkFailure(e)
            }
        };

        let entry = self.record(&request, &outcome);
        let rendered = render_outcome(&request.id, &outcome);

        Ok(ExecutionReport {
            request_id: request.id,
            outcome,
            rendered,
            entry,
        })
    }

    fn record(&self, request: &HttpRequest, outcome: &Outcome) -> HistoryEntry {
        let entry = HistoryEntry::from_request(request);
        let entry = match outcome.response() {
            Some(response) => entry.with_response(response.status_code, &response.status_text),
            None => entry.with_network_failure(),
        };

        update_shared(&self.history, |history| history.append(entry).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::ResultKind;
    use crate::history::{EntryStatus, HistoryConfig, HistoryStore};
    use crate::models::{HttpMethod, HttpResponse};
    use crate::storage::MemorySlotStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Replies with a fixed result and remembers what it was sent.
    struct StubTransport {
        reply: Result<HttpResponse, RequestError>,
        calls: AtomicUsize,
        sent: Mutex<Vec<HttpRequest>>,
    }

    impl StubTransport {
        fn replying(status: u16, reason: &str, content_type: &str, body: &str) -> Self {
            let mut response = HttpResponse::new(status, reason.to_string());
            response.add_header("Content-Type".to_string(), content_type.to_string());
            response.set_body(body.as_bytes().to_vec());
            Self::with_reply(Ok(response))
        }

        fn failing(error: RequestError) -> Self {
            Self::with_reply(Err(error))
        }

        fn with_reply(reply: Result<HttpResponse, RequestError>) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for StubTransport {
        async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.sent.lock().unwrap().push(request.clone());
            tokio::task::yield_now().await;
            self.reply.clone()
        }
    }

    fn executor(transport: StubTransport) -> Executor<Arc<StubTransport>, MemorySlotStore> {
        let history = HistoryStore::open(MemorySlotStore::new(), HistoryConfig::default());
        Executor::new(Arc::new(transport), history.into_shared())
    }

    #[tokio::test]
    async fn test_json_success_is_rendered_and_recorded() {
        let exec = executor(StubTransport::replying(200, "OK", "application/json", r#"{"ok":true}"#));
        let inputs = ComposerInputs::new(HttpMethod::GET, "https://api.example.com/ok");

        let report = exec.execute(&inputs).await.unwrap();

        assert_eq!(report.rendered.kind, ResultKind::Success);
        assert_eq!(report.rendered.body, "{\n  \"ok\": true\n}");
        assert_eq!(report.entry.status, Some(EntryStatus::Code(200)));

        let history = exec.history().lock().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.list()[0].url, "https://api.example.com/ok");
    }

    #[tokio::test]
    async fn test_not_found_is_http_error() {
        let exec = executor(StubTransport::replying(404, "Not Found", "text/plain", "not found"));
        let inputs = ComposerInputs::new(HttpMethod::GET, "https://api.example.com/missing");

        let report = exec.execute(&inputs).await.unwrap();

        assert_eq!(report.rendered.kind, ResultKind::HttpError);
        assert_eq!(report.rendered.body, "not found");
        assert_eq!(report.entry.status, Some(EntryStatus::Code(404)));
        assert_eq!(report.entry.status_text.as_deref(), Some("Not Found"));
    }

    #[tokio::test]
    async fn test_network_failure_records_sentinel() {
        let exec = executor(StubTransport::failing(RequestError::NetworkError(
            "Connection refused".to_string(),
        )));
        let inputs = ComposerInputs::new(HttpMethod::POST, "http://localhost:1/");

        let report = exec.execute(&inputs).await.unwrap();

        assert!(report.outcome.is_network_failure());
        assert_eq!(report.rendered.body, "Error: Network error: Connection refused");
        assert_eq!(report.entry.status, Some(EntryStatus::NetworkFailure));
        assert_eq!(exec.history().lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_url_is_rejected_without_sending() {
        let transport = Arc::new(StubTransport::replying(200, "OK", "text/plain", ""));
        let history = HistoryStore::open(MemorySlotStore::new(), HistoryConfig::default());
        let exec = Executor::new(Arc::clone(&transport), history.into_shared());

        for url in ["", "   ", "\t\n"] {
            let inputs = ComposerInputs::new(HttpMethod::GET, url);
            let err = exec.execute(&inputs).await.unwrap_err();
            assert_eq!(err, ExecuteError::InvalidInput(EMPTY_URL_WARNING.to_string()));
        }

        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
        assert!(exec.history().lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_body_is_recorded_but_not_sent() {
        let transport = Arc::new(StubTransport::replying(200, "OK", "text/plain", "ok"));
        let history = HistoryStore::open(MemorySlotStore::new(), HistoryConfig::default());
        let exec = Executor::new(Arc::clone(&transport), history.into_shared());

        let mut inputs = ComposerInputs::new(HttpMethod::GET, "  https://api.example.com  ");
        inputs.body = "ignored".to_string();
        exec.execute(&inputs).await.unwrap();

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent[0].url, "https://api.example.com");
        assert_eq!(sent[0].outgoing_body(), None);
    }

    #[tokio::test]
    async fn test_overlapping_sends_each_recorded_once() {
        let exec = executor(StubTransport::replying(201, "Created", "application/json", "{}"));
        let first = ComposerInputs::new(HttpMethod::POST, "https://api.example.com/a");
        let second = ComposerInputs::new(HttpMethod::POST, "https://api.example.com/b");

        let (a, b) = tokio::join!(exec.execute(&first), exec.execute(&second));
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_ne!(a.request_id, b.request_id);
        assert_eq!(a.rendered.request_id, a.request_id);

        let history = exec.history().lock().unwrap();
        assert_eq!(history.len(), 2);
        let mut urls: Vec<&str> = history.list().iter().map(|e| e.url.as_str()).collect();
        urls.sort();
        assert_eq!(urls, vec!["https://api.example.com/a", "https://api.example.com/b"]);
    }
}
