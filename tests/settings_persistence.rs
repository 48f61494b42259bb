/// Integration tests for the settings store over the JSON file backend,
/// and for handing settings-derived modes into the stats aggregator.
use std::sync::Arc;

use freedle::game::{Settings, SettingsStore, StatsManager};
use freedle::storage::{JsonFileStore, KeyValueStore, SharedStore, SETTINGS_NAMESPACE};
use tempfile::tempdir;

#[test]
fn test_settings_written_to_namespace_file() {
    let dir = tempdir().unwrap();
    let store: SharedStore = Arc::new(JsonFileStore::open(dir.path()).unwrap());
    let mut settings = SettingsStore::new(store.clone());
    settings.set_word_length(4);
    settings.set_hard_mode(true);

    let raw = std::fs::read_to_string(dir.path().join("freedle-settings.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["wordLength"], 4);
    assert_eq!(doc["hardMode"], true);
    assert_eq!(doc["countMode"], false);
    assert_eq!(store.load(SETTINGS_NAMESPACE).unwrap(), Some(doc));
}

#[test]
fn test_invalid_word_length_leaves_prior_value() {
    let dir = tempdir().unwrap();
    let store: SharedStore = Arc::new(JsonFileStore::open(dir.path()).unwrap());
    let mut settings = SettingsStore::new(store.clone());
    settings.set_word_length(6);
    settings.set_word_length(7);
    assert_eq!(settings.word_length(), 6);

    let reloaded = SettingsStore::new(store);
    assert_eq!(reloaded.word_length(), 6);
}

#[test]
fn test_corrupt_settings_file_uses_defaults() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("freedle-settings.json"), "{ wordLength: ").unwrap();
    let store: SharedStore = Arc::new(JsonFileStore::open(dir.path()).unwrap());
    let settings = SettingsStore::new(store);
    assert_eq!(settings.settings(), Settings::default());
}

#[test]
fn test_settings_and_stats_share_one_store() {
    let dir = tempdir().unwrap();
    let store: SharedStore = Arc::new(JsonFileStore::open(dir.path()).unwrap());
    let mut settings = SettingsStore::new(store.clone());
    let mut stats = StatsManager::new(store);

    settings.set_word_length(6);
    settings.set_count_mode(true);
    stats.record_win(5, settings.word_length(), settings.modes());

    let snap = stats.snapshot();
    assert_eq!(snap.wins_by_6_letter, 1);
    assert_eq!(snap.wins_by_count_mode, 1);
    assert_eq!(snap.wins_by_hard_mode, 0);
    assert!(stats.is_unlocked("win_count_mode"));
    assert!(dir.path().join("freedle-stats.json").exists());
    assert!(dir.path().join("freedle-settings.json").exists());
}
