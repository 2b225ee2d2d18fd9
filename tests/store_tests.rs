use chrono::NaiveDate;
use nback::scoring::PerformanceTier;
use nback::store::{JsonStore, Preferences, StoredData, DEFAULT_DAILY_GOAL};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("absent.json"));
    let data = store.load();
    assert_eq!(data.prefs, Preferences::default());
    assert_eq!(data.prefs.lag, 2);
    assert_eq!(data.prefs.session_secs, 60);
    assert!((data.prefs.round_secs - 2.0).abs() < f64::EPSILON);
    assert!(data.prefs.daily_reminder);
    assert!(data.prefs.adaptive_level);
    assert!(!data.prefs.haptics);
    assert!(data.history.is_empty());
}

#[test]
fn corrupt_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "{ not json").unwrap();
    let data = JsonStore::new(&path).load();
    assert_eq!(data, StoredData::default());
}

#[test]
fn save_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("store.json"));

    let mut data = StoredData::default();
    data.prefs.lag = 3;
    data.prefs.haptics = true;
    data.record_session(date(2026, 8, 29), PerformanceTier::Great);
    data.record_session(date(2026, 8, 29), PerformanceTier::Excellent);
    store.save(&data).unwrap();

    let loaded = store.load();
    assert_eq!(loaded, data);
    let entry = loaded.today(date(2026, 8, 29)).unwrap();
    assert_eq!(entry.sessions_completed, 2);
    assert_eq!(entry.goal, DEFAULT_DAILY_GOAL);
    assert_eq!(entry.best_tier, Some(PerformanceTier::Excellent));
}

#[test]
fn partial_json_fills_missing_fields_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, r#"{"prefs":{"lag":4}}"#).unwrap();
    let data = JsonStore::new(&path).load();
    assert_eq!(data.prefs.lag, 4);
    assert_eq!(data.prefs.session_secs, 60);
    assert!(data.history.is_empty());
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("nested/deeper/store.json"));
    store.save(&StoredData::default()).unwrap();
    assert!(store.path().exists());
}
