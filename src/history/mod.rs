//! Request history tracking and persistence.
//!
//! Every send that reaches the network, whatever its outcome, is recorded in
//! a bounded log, newest first. Entries can be listed, replayed into the
//! composer, and deleted.
//!
//! # Features
//!
//! - Most-recent-first log capped at 50 entries by default
//! - Persisted as a single JSON array through a [`SlotStore`](crate::storage::SlotStore)
//! - Corrupted or unavailable storage degrades to an empty log
//! - Optional sensitive header sanitization before persistence
//!
//! # Example
//!
//! ```
//! use api_tester::history::{HistoryConfig, HistoryEntry, HistoryStore};
//! use api_tester::models::{HttpMethod, HttpRequest};
//! use api_tester::storage::MemorySlotStore;
//!
//! let mut store = HistoryStore::open(MemorySlotStore::new(), HistoryConfig::default());
//! let request = HttpRequest::new(HttpMethod::GET, "https://api.example.com/users");
//! store.append(HistoryEntry::from_request(&request).with_response(200, "OK"));
//!
//! assert_eq!(store.list()[0].url, "https://api.example.com/users");
//! ```

pub mod models;
pub mod store;
pub mod ui;

pub use models::{EntryStatus, HistoryEntry, NETWORK_FAILURE_SENTINEL};
pub use store::{
    update_shared, HistoryConfig, HistoryListener, HistoryNotice, HistoryStore, SharedHistory,
    DEFAULT_HISTORY_LIMIT,
};
pub use ui::{format_history_details, format_history_entry, format_history_list};
