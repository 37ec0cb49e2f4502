//! The bounded, persisted history log.
//!
//! The whole log is one JSON array, newest first, kept in the
//! [`HISTORY_SLOT`] of a [`SlotStore`]. Every mutation rewrites the slot in
//! full. Subscribers are not called from inside a mutation: the change is
//! held as a pending [`HistoryNotice`] that the caller delivers once it no
//! longer holds the store, which is what [`update_shared`] does.
//!
//! Load problems of any kind (slot unreadable, not JSON, wrong shape) leave
//! the store empty. Save problems are logged and the in-memory log stays
//! authoritative for the rest of the session.

use super::models::HistoryEntry;
use crate::composer::ComposerInputs;
use crate::config::AppConfig;
use crate::storage::{SlotStore, HISTORY_SLOT};
use std::sync::{Arc, Mutex, PoisonError};

/// Number of entries kept unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Callback invoked with the full list after every change.
pub type HistoryListener = Arc<dyn Fn(&[HistoryEntry]) + Send + Sync>;

/// A history store shared between concurrently running sends.
pub type SharedHistory<P> = Arc<Mutex<HistoryStore<P>>>;

/// Configuration for history storage.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryConfig {
    /// Maximum number of entries to keep in history.
    pub max_entries: usize,

    /// Whether to strip sensitive headers before persisting.
    pub sanitize_sensitive_headers: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_HISTORY_LIMIT,
            sanitize_sensitive_headers: false,
        }
    }
}

impl HistoryConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_entries: config.history_limit,
            sanitize_sensitive_headers: config.sanitize_sensitive_headers,
        }
    }
}

/// A list snapshot and the subscribers still to be told about it.
#[must_use = "subscribers only run when the notice is delivered"]
pub struct HistoryNotice {
    entries: Vec<HistoryEntry>,
    listeners: Vec<HistoryListener>,
}

impl HistoryNotice {
    pub fn deliver(self) {
        for listener in &self.listeners {
            listener(&self.entries);
        }
    }
}

/// Runs `f` on the shared store and notifies subscribers after the lock is
/// released, so a subscriber may lock the history itself.
pub fn update_shared<P, R, F>(history: &SharedHistory<P>, f: F) -> R
where
    P: SlotStore,
    F: FnOnce(&mut HistoryStore<P>) -> R,
{
    let (result, notice) = {
        let mut store = history.lock().unwrap_or_else(PoisonError::into_inner);
        let result = f(&mut *store);
        (result, store.take_notice())
    };

    if let Some(notice) = notice {
        notice.deliver();
    }
    result
}

/// Bounded, most-recent-first log of executed requests.
pub struct HistoryStore<P: SlotStore> {
    port: P,
    config: HistoryConfig,
    entries: Vec<HistoryEntry>,
    listeners: Vec<HistoryListener>,
    pending: bool,
}

impl<P: SlotStore> HistoryStore<P> {
    /// Opens the store, loading whatever the slot holds.
    ///
    /// A limit of zero is raised to one.
    pub fn open(port: P, mut config: HistoryConfig) -> Self {
        if config.max_entries == 0 {
            log::warn!("History limit of 0 is not usable, keeping 1 entry");
            config.max_entries = 1;
        }

        let entries = load_entries(&port, config.max_entries);
        log::debug!("Loaded {} history entries", entries.len());

        Self {
            port,
            config,
            entries,
            listeners: Vec::new(),
            pending: false,
        }
    }

    /// Wraps the store for sharing across tasks.
    pub fn into_shared(self) -> SharedHistory<P> {
        Arc::new(Mutex::new(self))
    }

    /// Registers a callback that receives the new list when a change is
    /// delivered.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&[HistoryEntry]) + Send + Sync + 'static,
    {
        self.listeners.push(Arc::new(listener));
    }

    /// Takes the notice for changes made since the last call, if any.
    pub fn take_notice(&mut self) -> Option<HistoryNotice> {
        if !std::mem::take(&mut self.pending) {
            return None;
        }

        Some(HistoryNotice {
            entries: self.entries.clone(),
            listeners: self.listeners.clone(),
        })
    }

    /// Prepends `entry` with a fresh timestamp and evicts past the limit.
    ///
    /// Returns the stored entry.
    pub fn append(&mut self, mut entry: HistoryEntry) -> &HistoryEntry {
        entry.date = HistoryEntry::timestamp_now();
        self.entries.insert(0, entry);

        if self.entries.len() > self.config.max_entries {
            let evicted = self.entries.len() - self.config.max_entries;
            self.entries.truncate(self.config.max_entries);
            log::debug!("Evicted {} history entries over the limit", evicted);
        }

        self.changed();
        &self.entries[0]
    }

    /// Deletes the entry at `index` (0 = newest).
    ///
    /// Out of range is a silent no-op: nothing is persisted or re-rendered.
    pub fn remove(&mut self, index: usize) -> Option<HistoryEntry> {
        if index >= self.entries.len() {
            return None;
        }

        let removed = self.entries.remove(index);
        self.changed();
        Some(removed)
    }

    /// Deletes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.changed();
    }

    /// All entries, newest first.
    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.config.max_entries
    }

    /// Composer inputs for the entry at `index`.
    ///
    /// Reads only: the log is not touched and nothing is sent.
    pub fn replay(&self, index: usize) -> Option<ComposerInputs> {
        self.entries.get(index).map(ComposerInputs::from_entry)
    }

    fn changed(&mut self) {
        self.persist();
        self.pending = true;
    }

    fn persist(&self) {
        let serialized = if self.config.sanitize_sensitive_headers {
            let sanitized: Vec<HistoryEntry> =
                self.entries.iter().map(|e| e.sanitize_headers()).collect();
            serde_json::to_string(&sanitized)
        } else {
            serde_json::to_string(&self.entries)
        };

        let result = serialized
            .map_err(Into::into)
            .and_then(|json| self.port.save(HISTORY_SLOT, &json));

        if let Err(e) = result {
            log::warn!("Failed to persist history: {}", e);
        }
    }
}

fn load_entries<P: SlotStore>(port: &P, limit: usize) -> Vec<HistoryEntry> {
    let raw = match port.load(HISTORY_SLOT) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::warn!("History unavailable, starting empty: {}", e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
        Ok(mut entries) => {
            entries.truncate(limit);
            entries
        }
        Err(e) => {
            log::warn!("Stored history is corrupted, starting empty: {}", e);
            Vec::new()
        }
    }
}
