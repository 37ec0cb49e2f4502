//! End-to-end tests: composer inputs through the real transport against a
//! mock server, down to the rendered result and the history entry.

use super::{file_executor, unused_local_url};
use api_tester::composer::{ComposerInputs, EMPTY_URL_WARNING};
use api_tester::executor::{ExecuteError, Outcome, ResponseBody};
use api_tester::formatter::{ResultKind, NO_CONTENT_MESSAGE};
use api_tester::history::{EntryStatus, NETWORK_FAILURE_SENTINEL};
use api_tester::models::HttpMethod;
use api_tester::storage::{FileSlotStore, SlotStore, HISTORY_SLOT};
use tempfile::TempDir;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_json_success_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"ok":true}"#, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let executor = file_executor(dir.path());
    let inputs = ComposerInputs::new(HttpMethod::GET, format!("{}/ok", server.uri()));

    let report = executor.execute(&inputs).await.unwrap();

    assert_eq!(report.rendered.kind, ResultKind::Success);
    assert_eq!(report.rendered.status_line, "200 OK");
    assert_eq!(report.rendered.body, "{\n  \"ok\": true\n}");

    let history = executor.history().lock().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history.list()[0].status, Some(EntryStatus::Code(200)));
}

#[tokio::test]
async fn test_not_found_text_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_raw("not found", "text/plain"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let executor = file_executor(dir.path());
    let inputs = ComposerInputs::new(HttpMethod::GET, format!("{}/missing", server.uri()));

    let report = executor.execute(&inputs).await.unwrap();

    assert_eq!(report.rendered.kind, ResultKind::HttpError);
    assert_eq!(report.rendered.body, "not found");
    assert_eq!(report.entry.status, Some(EntryStatus::Code(404)));
    assert_eq!(report.entry.status_text.as_deref(), Some("Not Found"));
}

#[tokio::test]
async fn test_no_content_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/items/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let executor = file_executor(dir.path());
    let inputs = ComposerInputs::new(HttpMethod::DELETE, format!("{}/items/1", server.uri()));

    let report = executor.execute(&inputs).await.unwrap();

    assert_eq!(report.rendered.kind, ResultKind::Success);
    assert_eq!(report.rendered.body, NO_CONTENT_MESSAGE);
    assert_eq!(report.entry.status, Some(EntryStatus::Code(204)));
}

#[tokio::test]
async fn test_malformed_json_keeps_real_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_raw("<html>bad gateway", "application/json"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let executor = file_executor(dir.path());
    let inputs = ComposerInputs::new(HttpMethod::GET, server.uri());

    let report = executor.execute(&inputs).await.unwrap();

    match &report.outcome {
        Outcome::HttpError(response) => {
            assert!(matches!(response.body, ResponseBody::MalformedJson { .. }));
        }
        other => panic!("expected an HTTP error outcome, got {:?}", other),
    }
    assert_eq!(report.rendered.body, "<html>bad gateway");
    assert_eq!(report.entry.status, Some(EntryStatus::Code(502)));
}

#[tokio::test]
async fn test_post_sends_headers_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("Content-Type", "application/json"))
        .and(header("X-Trace", "abc"))
        .and(body_string(r#"{"name":"Ada"}"#))
        .respond_with(ResponseTemplate::new(201).set_body_raw(r#"{"id":1}"#, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let executor = file_executor(dir.path());

    let mut inputs = ComposerInputs::new(HttpMethod::POST, format!("{}/users", server.uri()));
    inputs.header_rows.clear();
    inputs.add_preset("Content-Type: application/json");
    inputs.add_header_row("  X-Trace ", " abc ");
    inputs.add_header_row("", "ignored");
    inputs.body = r#"{"name":"Ada"}"#.to_string();

    let report = executor.execute(&inputs).await.unwrap();

    assert_eq!(report.rendered.status_line, "201 Created");
    assert_eq!(report.entry.headers.len(), 2);
    assert_eq!(report.entry.body.as_deref(), Some(r#"{"name":"Ada"}"#));
}

#[tokio::test]
async fn test_get_body_not_transmitted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let executor = file_executor(dir.path());
    let mut inputs = ComposerInputs::new(HttpMethod::GET, server.uri());
    inputs.body = "should not be sent".to_string();

    executor.execute(&inputs).await.unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].body.is_empty());
}

#[tokio::test]
async fn test_connection_failure_records_sentinel() {
    let dir = TempDir::new().unwrap();
    let executor = file_executor(dir.path());
    let inputs = ComposerInputs::new(HttpMethod::GET, unused_local_url());

    let report = executor.execute(&inputs).await.unwrap();

    assert!(report.outcome.is_network_failure());
    assert_eq!(report.rendered.kind, ResultKind::NetworkFailure);
    assert!(report.rendered.body.starts_with("Error: "));

    let stored = FileSlotStore::new(dir.path())
        .load(HISTORY_SLOT)
        .unwrap()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(value[0]["status"], NETWORK_FAILURE_SENTINEL);
    assert_eq!(value.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_url_is_network_failure() {
    let dir = TempDir::new().unwrap();
    let executor = file_executor(dir.path());
    let inputs = ComposerInputs::new(HttpMethod::GET, "not a url");

    let report = executor.execute(&inputs).await.unwrap();

    assert_eq!(report.entry.status, Some(EntryStatus::NetworkFailure));
    assert_eq!(executor.history().lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_blank_url_never_reaches_network() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let executor = file_executor(dir.path());

    let err = executor
        .execute(&ComposerInputs::new(HttpMethod::POST, "   "))
        .await
        .unwrap_err();

    assert_eq!(err, ExecuteError::InvalidInput(EMPTY_URL_WARNING.to_string()));
    assert!(executor.history().lock().unwrap().is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
    assert!(FileSlotStore::new(dir.path()).load(HISTORY_SLOT).unwrap().is_none());
}

#[tokio::test]
async fn test_replay_then_resend() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/items/7"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("updated", "text/plain"))
        .expect(2)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let executor = file_executor(dir.path());
    let mut inputs = ComposerInputs::new(HttpMethod::PUT, format!("{}/items/7", server.uri()));
    inputs.body = "v2".to_string();
    executor.execute(&inputs).await.unwrap();

    let replayed = executor.history().lock().unwrap().replay(0).unwrap();
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
    assert_eq!(replayed.method, HttpMethod::PUT);
    assert_eq!(replayed.body, "v2");

    executor.execute(&replayed).await.unwrap();
    assert_eq!(executor.history().lock().unwrap().len(), 2);
}
