//! Text formatting for history display.
//!
//! Turns entries into the lines the history list shows: one summary line per
//! entry, plus a detailed block with headers and body for a single entry.

use super::models::{EntryStatus, HistoryEntry};
use chrono::{DateTime, Local};

/// Shown in place of the list when there is no history.
pub const EMPTY_HISTORY_MESSAGE: &str = "No requests in history";

/// Formats a list of history entries, one line per entry.
///
/// Each line is prefixed with the entry's position, the index that
/// `replay` and `delete` take.
pub fn format_history_list(entries: &[HistoryEntry]) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| format!("[{}] {}", index, format_history_entry(entry)))
        .collect()
}

/// Formats a single history entry for list display.
///
/// Format: "METHOD URL - STATUS (timestamp)"
/// Example: "GET https://api.example.com/users - 200 OK (2025-01-15 14:30:45)"
pub fn format_history_entry(entry: &HistoryEntry) -> String {
    format!(
        "{} {} - {} ({})",
        entry.method.as_str(),
        entry.url,
        format_status(entry),
        format_timestamp(&entry.date)
    )
}

/// Formats the outcome of an entry: code and reason, the failure marker,
/// or a dash when no status was recorded.
pub fn format_status(entry: &HistoryEntry) -> String {
    match (&entry.status, &entry.status_text) {
        (Some(EntryStatus::Code(code)), Some(text)) => format!("{} {}", code, text),
        (Some(EntryStatus::Code(code)), None) => code.to_string(),
        (Some(EntryStatus::NetworkFailure), _) => "network error".to_string(),
        (None, _) => "-".to_string(),
    }
}

/// Formats an entry with its headers and body.
pub fn format_history_details(entry: &HistoryEntry) -> String {
    let mut output = String::new();

    output.push_str(&format!("{} {}\n", entry.method.as_str(), entry.url));
    output.push_str(&format!("Status: {}\n", format_status(entry)));
    output.push_str(&format!("Date: {}\n", format_timestamp(&entry.date)));

    if !entry.headers.is_empty() {
        let mut headers: Vec<_> = entry.headers.iter().collect();
        headers.sort();
        output.push_str("\nHeaders:\n");
        for (key, value) in headers {
            output.push_str(&format!("  {}: {}\n", key, value));
        }
    }

    if let Some(body) = entry.body.as_deref().filter(|b| !b.is_empty()) {
        output.push_str("\nBody:\n");
        output.push_str(body);
        output.push('\n');
    }

    output
}

/// Renders a stored RFC 3339 date in local time.
///
/// Dates that do not parse are shown as stored.
pub fn format_timestamp(date: &str) -> String {
    match DateTime::parse_from_rfc3339(date) {
        Ok(parsed) => parsed
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        Err(_) => date.to_string(),
    }
}
