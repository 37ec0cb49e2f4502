//! The controller tying a surface to the executor and the history.

use crate::executor::{ExecutionReport, Executor, Transport};
use crate::history::{update_shared, HistoryEntry, HistoryStore, SharedHistory};
use crate::storage::SlotStore;
use crate::surface::Surface;
use std::sync::{Arc, MutexGuard, PoisonError};

/// Reacts to user actions on a [`Surface`].
///
/// The history list is re-rendered through a store subscription, so every
/// change shows up on the surface no matter which action caused it. The
/// subscription runs after the history lock is released, so the surface may
/// read the history while rendering.
pub struct ApiTester<S: Surface + 'static, T: Transport, P: SlotStore> {
    surface: Arc<S>,
    executor: Executor<T, P>,
}

impl<S: Surface + 'static, T: Transport, P: SlotStore> ApiTester<S, T, P> {
    pub fn new(surface: Arc<S>, transport: T, mut history: HistoryStore<P>) -> Self {
        let listener = Arc::clone(&surface);
        history.subscribe(move |entries| listener.render_history(entries));

        Self {
            surface,
            executor: Executor::new(transport, history.into_shared()),
        }
    }

    pub fn surface(&self) -> &Arc<S> {
        &self.surface
    }

    pub fn history(&self) -> &SharedHistory<P> {
        self.executor.history()
    }

    /// Sends whatever the composer holds and renders the result.
    ///
    /// An empty URL is shown as a warning and nothing else happens.
    pub async fn send_request(&self) -> Option<ExecutionReport> {
        let inputs = self.surface.read_inputs();

        match self.executor.execute(&inputs).await {
            Ok(report) => {
                self.surface.render_result(&report.rendered);
                Some(report)
            }
            Err(e) => {
                self.surface.warn(&e.to_string());
                None
            }
        }
    }

    /// Loads the entry at `index` into the composer. Returns `false` when
    /// there is no such entry.
    pub fn replay(&self, index: usize) -> bool {
        let inputs = self.lock_history().replay(index);

        match inputs {
            Some(inputs) => {
                self.surface.set_inputs(&inputs);
                true
            }
            None => false,
        }
    }

    /// Deletes the entry at `index`; out of range does nothing.
    pub fn remove(&self, index: usize) -> Option<HistoryEntry> {
        update_shared(self.history(), |history| history.remove(index))
    }

    pub fn clear_history(&self) {
        update_shared(self.history(), |history| history.clear());
    }

    /// Pushes the current list to the surface, e.g. at startup.
    pub fn render_history(&self) {
        let entries = self.lock_history().list().to_vec();
        self.surface.render_history(&entries);
    }

    fn lock_history(&self) -> MutexGuard<'_, HistoryStore<P>> {
        self.history().lock().unwrap_or_else(PoisonError::into_inner)
    }
}
