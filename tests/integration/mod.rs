//! Shared helpers for the integration tests.
//!
//! Every test gets its own temporary data directory and, where it needs a
//! server, its own `wiremock` instance.

pub mod assets_test;
pub mod end_to_end_test;
pub mod history_persistence_test;

use api_tester::executor::{ExecutionConfig, Executor, ReqwestTransport};
use api_tester::history::{HistoryConfig, HistoryStore};
use api_tester::storage::FileSlotStore;
use std::path::Path;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// An executor using the real transport and a file-backed history in `dir`.
pub fn file_executor(dir: &Path) -> Executor<ReqwestTransport, FileSlotStore> {
    init_test_env();
    let history = HistoryStore::open(FileSlotStore::new(dir), HistoryConfig::default());
    let transport = ReqwestTransport::new(&ExecutionConfig::default())
        .expect("Failed to build transport");
    Executor::new(transport, history.into_shared())
}

/// A local URL nothing is listening on.
pub fn unused_local_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local address").port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}
