//! The UI surface the controller drives.
//!
//! A surface shows the composer, the result pane and the history list. The
//! terminal front end implements it; tests use a recording double.

use crate::composer::ComposerInputs;
use crate::formatter::RenderedResult;
use crate::history::HistoryEntry;

/// Everything the controller needs from a user interface.
///
/// Methods take `&self` because history re-renders arrive from a store
/// subscription that may fire on any task.
pub trait Surface: Send + Sync {
    /// Current composer contents.
    fn read_inputs(&self) -> ComposerInputs;

    /// Replaces the composer contents, e.g. on replay.
    fn set_inputs(&self, inputs: &ComposerInputs);

    /// Shows the result of one send.
    fn render_result(&self, result: &RenderedResult);

    /// Shows the full history list, newest first.
    fn render_history(&self, entries: &[HistoryEntry]);

    /// Shows a short user-facing warning.
    fn warn(&self, message: &str);
}
