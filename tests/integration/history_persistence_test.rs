//! History persistence across sessions, through the file-backed slot store.

use super::init_test_env;
use api_tester::history::{HistoryConfig, HistoryEntry, HistoryStore};
use api_tester::models::{HttpMethod, HttpRequest};
use api_tester::storage::{FileSlotStore, SlotStore, HISTORY_SLOT};
use api_tester::theme::{Theme, ThemeStore};
use std::fs;
use tempfile::TempDir;

fn entry(url: &str, status: u16) -> HistoryEntry {
    HistoryEntry::from_request(&HttpRequest::new(HttpMethod::GET, url)).with_response(status, "")
}

#[test]
fn test_history_survives_reopen() {
    init_test_env();
    let dir = TempDir::new().unwrap();

    {
        let mut store = HistoryStore::open(FileSlotStore::new(dir.path()), HistoryConfig::default());
        store.append(entry("https://a.example.com", 200));
        store.append(entry("https://b.example.com", 500));
    }

    let reopened = HistoryStore::open(FileSlotStore::new(dir.path()), HistoryConfig::default());
    let urls: Vec<&str> = reopened.list().iter().map(|e| e.url.as_str()).collect();
    assert_eq!(urls, vec!["https://b.example.com", "https://a.example.com"]);
    assert!(!reopened.list()[0].date.is_empty());
}

#[test]
fn test_corrupted_history_file_loads_empty() {
    init_test_env();
    let dir = TempDir::new().unwrap();
    let slots = FileSlotStore::new(dir.path());
    fs::write(slots.slot_path(HISTORY_SLOT), "{ this is not json").unwrap();

    let mut store = HistoryStore::open(slots.clone(), HistoryConfig::default());
    assert!(store.is_empty());

    // the next append replaces the broken file with a valid log
    store.append(entry("https://a.example.com", 200));
    let raw = slots.load(HISTORY_SLOT).unwrap().unwrap();
    let parsed: Vec<HistoryEntry> = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.len(), 1);
}

#[test]
fn test_wrong_shape_loads_empty() {
    init_test_env();
    let dir = TempDir::new().unwrap();
    let slots = FileSlotStore::new(dir.path());
    slots.save(HISTORY_SLOT, r#"{"entries": []}"#).unwrap();

    let store = HistoryStore::open(slots, HistoryConfig::default());
    assert!(store.is_empty());
}

#[test]
fn test_bound_holds_across_sessions() {
    init_test_env();
    let dir = TempDir::new().unwrap();

    for session in 0..3 {
        let mut store = HistoryStore::open(FileSlotStore::new(dir.path()), HistoryConfig::default());
        for i in 0..30 {
            store.append(entry(&format!("https://example.com/{}/{}", session, i), 200));
        }
        assert!(store.len() <= 50);
    }

    let store = HistoryStore::open(FileSlotStore::new(dir.path()), HistoryConfig::default());
    assert_eq!(store.len(), 50);
    assert_eq!(store.list()[0].url, "https://example.com/2/29");
}

#[test]
fn test_removal_is_persisted() {
    init_test_env();
    let dir = TempDir::new().unwrap();

    let mut store = HistoryStore::open(FileSlotStore::new(dir.path()), HistoryConfig::default());
    store.append(entry("https://a.example.com", 200));
    store.append(entry("https://b.example.com", 200));
    store.remove(1);
    store.remove(9);

    let reopened = HistoryStore::open(FileSlotStore::new(dir.path()), HistoryConfig::default());
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.list()[0].url, "https://b.example.com");
}

#[test]
fn test_sanitized_headers_not_written() {
    init_test_env();
    let dir = TempDir::new().unwrap();
    let config = HistoryConfig {
        sanitize_sensitive_headers: true,
        ..Default::default()
    };

    let mut request = HttpRequest::new(HttpMethod::GET, "https://api.example.com");
    request.add_header("Authorization".to_string(), "Bearer secret".to_string());
    request.add_header("Accept".to_string(), "application/json".to_string());

    let mut store = HistoryStore::open(FileSlotStore::new(dir.path()), config);
    store.append(HistoryEntry::from_request(&request).with_response(200, "OK"));

    let raw = FileSlotStore::new(dir.path()).load(HISTORY_SLOT).unwrap().unwrap();
    assert!(!raw.contains("secret"));
    assert!(raw.contains("Accept"));
}

#[test]
fn test_theme_shares_data_dir_with_history() {
    init_test_env();
    let dir = TempDir::new().unwrap();

    let mut themes = ThemeStore::load(FileSlotStore::new(dir.path()));
    themes.set(Theme::Dark);

    let mut store = HistoryStore::open(FileSlotStore::new(dir.path()), HistoryConfig::default());
    store.append(entry("https://a.example.com", 200));

    assert_eq!(ThemeStore::load(FileSlotStore::new(dir.path())).current(), Theme::Dark);
    assert_eq!(
        HistoryStore::open(FileSlotStore::new(dir.path()), HistoryConfig::default()).len(),
        1
    );
}
