use chrono::TimeZone;

use super::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn signal(url: &str, timestamp: DateTime<Utc>) -> Signal {
    Signal {
        url: url.to_string(),
        title: format!("title for {url}"),
        source: Source::HackerNews,
        timestamp,
    }
}

fn candidate(url: &str) -> Candidate {
    Candidate {
        title: format!("candidate {url}"),
        url: url.to_string(),
        source: Source::Reddit,
        score: Some(10),
    }
}

fn scratch_path(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("sigintel-store-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir.join("signals.json")
}

#[test]
fn recorded_url_is_stale_until_window_elapses() {
    let window = DedupWindow::default();
    let mut store = SignalStore::new();
    assert!(store.is_fresh("https://x/1", window, now()));

    store.record("https://x/1", "One", Source::HackerNews, now());
    assert!(!store.is_fresh("https://x/1", window, now()));

    let almost = now() + Duration::days(7) - Duration::seconds(1);
    assert!(!store.is_fresh("https://x/1", window, almost));

    let elapsed = now() + Duration::days(7);
    assert!(store.is_fresh("https://x/1", window, elapsed));
}

#[test]
fn live_entry_blocks_same_url_only() {
    let store = SignalStore::from_signals(vec![signal("https://x/1", now() - Duration::days(2))]);
    let window = DedupWindow::default();
    assert!(!store.is_fresh("https://x/1", window, now()));
    assert!(store.is_fresh("https://x/2", window, now()));
}

#[test]
fn entry_exactly_at_cutoff_is_expired() {
    let window = DedupWindow::default();
    let at_cutoff = window.cutoff(now());
    assert!(!window.is_live(at_cutoff, now()));
    assert!(window.is_live(at_cutoff + Duration::milliseconds(1), now()));

    let store = SignalStore::from_signals(vec![signal("https://x/1", at_cutoff)]);
    assert!(store.is_fresh("https://x/1", window, now()));
    assert!(store.compact(window, now()).is_empty());
}

#[test]
fn expired_duplicate_does_not_block() {
    let store = SignalStore::from_signals(vec![
        signal("https://x/1", now() - Duration::days(30)),
        signal("https://x/1", now() - Duration::days(8)),
    ]);
    assert!(store.is_fresh("https://x/1", DedupWindow::default(), now()));
}

#[test]
fn future_timestamps_count_as_live() {
    let store = SignalStore::from_signals(vec![signal("https://x/1", now() + Duration::hours(1))]);
    assert!(!store.is_fresh("https://x/1", DedupWindow::default(), now()));
}

#[test]
fn compact_keeps_only_live_entries_in_order() {
    let store = SignalStore::from_signals(vec![
        signal("https://x/old", now() - Duration::days(10)),
        signal("https://x/a", now() - Duration::days(1)),
        signal("https://x/older", now() - Duration::days(7)),
        signal("https://x/b", now() - Duration::hours(3)),
    ]);
    let compacted = store.compact(DedupWindow::default(), now());
    let urls: Vec<&str> = compacted.signals().iter().map(|s| s.url.as_str()).collect();
    assert_eq!(urls, vec!["https://x/a", "https://x/b"]);
}

#[test]
fn compact_is_idempotent_under_fixed_clock() {
    let store = SignalStore::from_signals(vec![
        signal("https://x/old", now() - Duration::days(9)),
        signal("https://x/new", now() - Duration::days(3)),
    ]);
    let window = DedupWindow::default();
    let once = store.compact(window, now());
    let twice = once.clone().compact(window, now());
    assert_eq!(once, twice);
}

#[test]
fn custom_window_length_is_respected() {
    let store = SignalStore::from_signals(vec![signal("https://x/1", now() - Duration::days(2))]);
    assert!(store.is_fresh("https://x/1", DedupWindow::days(1), now()));
    assert!(!store.is_fresh("https://x/1", DedupWindow::days(3), now()));
}

#[test]
fn record_does_not_deduplicate() {
    let mut store = SignalStore::new();
    store.record("https://x/1", "One", Source::GitHub, now());
    store.record("https://x/1", "One again", Source::GitHub, now());
    assert_eq!(store.len(), 2);
}

#[test]
fn filter_fresh_drops_live_urls_and_batch_repeats() {
    let store = SignalStore::from_signals(vec![signal("https://x/1", now() - Duration::days(1))]);
    let fresh = store.filter_fresh(
        vec![
            candidate("https://x/1"),
            candidate("https://x/2"),
            candidate("https://x/3"),
            candidate("https://x/2"),
        ],
        DedupWindow::default(),
        now(),
    );
    let urls: Vec<&str> = fresh.iter().map(|c| c.url.as_str()).collect();
    assert_eq!(urls, vec!["https://x/2", "https://x/3"]);
}

#[test]
fn from_json_accepts_millisecond_timestamps() {
    let json = r#"{"signals":[{"url":"https://x/1","title":"One","source":"HackerNews","timestamp":"2025-05-30T12:00:00.000Z"}]}"#;
    let store = SignalStore::from_json(json);
    assert_eq!(store.len(), 1);
    assert_eq!(store.signals()[0].timestamp, now() - Duration::days(2));
    assert_eq!(store.signals()[0].source, Source::HackerNews);
}

#[test]
fn from_json_drops_entries_with_bad_timestamps() {
    let json = r#"{"signals":[
        {"url":"https://x/1","title":"One","source":"Reddit","timestamp":"yesterday"},
        {"url":"https://x/2","title":"Two","source":"Reddit","timestamp":"2025-05-31T00:00:00Z"},
        {"url":"https://x/3","title":"Three","source":"Reddit"}
    ]}"#;
    let store = SignalStore::from_json(json);
    let urls: Vec<&str> = store.signals().iter().map(|s| s.url.as_str()).collect();
    assert_eq!(urls, vec!["https://x/2"]);
}

#[test]
fn from_json_treats_garbage_as_empty() {
    assert!(SignalStore::from_json("").is_empty());
    assert!(SignalStore::from_json("not json").is_empty());
    assert!(SignalStore::from_json("[]").is_empty());
    assert!(SignalStore::from_json(r#"{"signals": 3}"#).is_empty());
}

#[test]
fn load_missing_file_is_empty() {
    let path = scratch_path("missing");
    assert!(SignalStore::load(&path).is_empty());
}

#[test]
fn save_then_load_round_trips() {
    let path = scratch_path("roundtrip");
    let mut store = SignalStore::new();
    store.record("https://x/1", "One", Source::Other("Lobsters".into()), now());
    store.record("https://x/2", "Two", Source::GitHub, now());

    store.save(&path).unwrap();
    let loaded = SignalStore::load(&path);
    assert_eq!(loaded, store);

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"signals\""));
    assert!(raw.contains("\"Lobsters\""));

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn save_failure_is_reported() {
    let path = scratch_path("blocked");
    let parent = path.parent().unwrap();
    std::fs::create_dir_all(parent.parent().unwrap()).unwrap();
    // A regular file where the parent directory should be.
    std::fs::write(parent, "not a directory").unwrap();

    let err = SignalStore::new().save(&path).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }), "expected Io, got: {err:?}");

    let _ = std::fs::remove_file(parent);
}
