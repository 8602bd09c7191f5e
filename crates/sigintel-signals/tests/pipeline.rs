//! Full-cycle tests with in-memory ranker and publisher fakes.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use sigintel_core::{
    Candidate, CommentRef, IssueRef, Publisher, Ranker, SelectedItem, Selection, Source,
};
use sigintel_signals::{run_signal_cycle, CycleConfig, DedupWindow, Signal, SignalStore};

#[derive(Debug, thiserror::Error)]
#[error("publisher unavailable")]
struct FakeError;

/// Picks the first `top_n` candidates, optionally flagging them as fallback.
struct TakeFirst {
    selection: Selection,
    seen_policy: Mutex<Option<String>>,
}

impl TakeFirst {
    fn new(selection: Selection) -> Self {
        Self {
            selection,
            seen_policy: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Ranker for TakeFirst {
    async fn rank(&self, candidates: &[Candidate], policy: &str, top_n: usize) -> Vec<SelectedItem> {
        *self.seen_policy.lock().unwrap() = Some(policy.to_string());
        candidates
            .iter()
            .take(top_n)
            .map(|c| SelectedItem {
                candidate: c.clone(),
                analysis: format!("analysis of {}", c.title),
                selection: self.selection,
            })
            .collect()
    }
}

#[derive(Default)]
struct RecordingPublisher {
    fail_issue: bool,
    /// Comment bodies containing this text fail to post.
    fail_comment_containing: Option<String>,
    issues: Mutex<Vec<(String, String, Vec<String>)>>,
    comments: Mutex<Vec<(u64, String)>>,
}

#[async_trait]
impl Publisher for RecordingPublisher {
    type Error = FakeError;

    async fn create_issue(
        &self,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> Result<IssueRef, FakeError> {
        if self.fail_issue {
            return Err(FakeError);
        }
        self.issues
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string(), labels.to_vec()));
        Ok(IssueRef {
            number: 17,
            url: "https://github.com/acme/intel/issues/17".to_string(),
        })
    }

    async fn post_comment(&self, issue_number: u64, body: &str) -> Result<CommentRef, FakeError> {
        if let Some(needle) = &self.fail_comment_containing {
            if body.contains(needle.as_str()) {
                return Err(FakeError);
            }
        }
        let mut comments = self.comments.lock().unwrap();
        comments.push((issue_number, body.to_string()));
        Ok(CommentRef {
            id: comments.len() as u64,
            url: format!("https://github.com/acme/intel/issues/17#c{}", comments.len()),
        })
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
}

fn candidate(url: &str) -> Candidate {
    Candidate {
        title: format!("Title {url}"),
        url: url.to_string(),
        source: Source::HackerNews,
        score: Some(100),
    }
}

fn stored(url: &str, age: Duration) -> Signal {
    Signal {
        url: url.to_string(),
        title: "old".to_string(),
        source: Source::Reddit,
        timestamp: now() - age,
    }
}

fn config(top_n: usize) -> CycleConfig {
    CycleConfig {
        window: DedupWindow::default(),
        top_n,
        labels: vec!["signal-intel".to_string()],
    }
}

fn urls(store: &SignalStore) -> Vec<&str> {
    store.signals().iter().map(|s| s.url.as_str()).collect()
}

#[tokio::test]
async fn publishes_fresh_candidates_and_records_them() {
    let store = SignalStore::from_signals(vec![stored("https://x/1", Duration::days(2))]);
    let ranker = TakeFirst::new(Selection::Ranked);
    let publisher = RecordingPublisher::default();

    let (store, report) = run_signal_cycle(
        store,
        vec![candidate("https://x/1"), candidate("https://x/2"), candidate("https://x/3")],
        "prefer rust",
        &ranker,
        &publisher,
        &config(5),
        now(),
    )
    .await;

    assert_eq!(report.candidates, 3);
    assert_eq!(report.fresh, 2);
    assert_eq!(report.selected, 2);
    assert_eq!(report.published, 2);
    assert!(!report.fallback);
    assert_eq!(report.issue.as_ref().map(|i| i.number), Some(17));
    assert_eq!(ranker.seen_policy.lock().unwrap().as_deref(), Some("prefer rust"));

    let issues = publisher.issues.lock().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].0, "Signal Intel: 2025-06-01");
    assert_eq!(issues[0].2, vec!["signal-intel".to_string()]);

    let comments = publisher.comments.lock().unwrap();
    assert_eq!(comments.len(), 2);
    assert!(comments[0].1.starts_with("## Signal 1: Title https://x/2"));
    assert!(comments[1].1.starts_with("## Signal 2: Title https://x/3"));
    assert!(comments.iter().all(|(number, _)| *number == 17));

    assert_eq!(urls(&store), vec!["https://x/1", "https://x/2", "https://x/3"]);
    assert!(store.signals()[1..].iter().all(|s| s.timestamp == now()));
}

#[tokio::test]
async fn expired_entries_are_evicted_even_without_fresh_candidates() {
    let store = SignalStore::from_signals(vec![
        stored("https://x/old", Duration::days(9)),
        stored("https://x/1", Duration::days(1)),
    ]);
    let publisher = RecordingPublisher::default();

    let (store, report) = run_signal_cycle(
        store,
        vec![candidate("https://x/1")],
        "",
        &TakeFirst::new(Selection::Ranked),
        &publisher,
        &config(5),
        now(),
    )
    .await;

    assert_eq!(report.fresh, 0);
    assert_eq!(report.evicted, 1);
    assert!(report.issue.is_none());
    assert!(publisher.issues.lock().unwrap().is_empty());
    assert_eq!(urls(&store), vec!["https://x/1"]);
}

#[tokio::test]
async fn expired_url_becomes_eligible_again() {
    let store = SignalStore::from_signals(vec![stored("https://x/1", Duration::days(8))]);

    let (store, report) = run_signal_cycle(
        store,
        vec![candidate("https://x/1")],
        "",
        &TakeFirst::new(Selection::Ranked),
        &RecordingPublisher::default(),
        &config(5),
        now(),
    )
    .await;

    assert_eq!(report.fresh, 1);
    assert_eq!(report.published, 1);
    assert_eq!(urls(&store), vec!["https://x/1"]);
    assert_eq!(store.signals()[0].timestamp, now());
}

#[tokio::test]
async fn failed_issue_creation_records_nothing() {
    let publisher = RecordingPublisher {
        fail_issue: true,
        ..RecordingPublisher::default()
    };

    let (store, report) = run_signal_cycle(
        SignalStore::new(),
        vec![candidate("https://x/1"), candidate("https://x/2")],
        "",
        &TakeFirst::new(Selection::Ranked),
        &publisher,
        &config(5),
        now(),
    )
    .await;

    assert_eq!(report.selected, 2);
    assert_eq!(report.published, 0);
    assert!(report.issue.is_none());
    assert!(store.is_empty());
}

#[tokio::test]
async fn failed_comment_leaves_only_that_item_unrecorded() {
    let publisher = RecordingPublisher {
        fail_comment_containing: Some("https://x/2".to_string()),
        ..RecordingPublisher::default()
    };

    let (store, report) = run_signal_cycle(
        SignalStore::new(),
        vec![candidate("https://x/1"), candidate("https://x/2"), candidate("https://x/3")],
        "",
        &TakeFirst::new(Selection::Ranked),
        &publisher,
        &config(5),
        now(),
    )
    .await;

    assert_eq!(report.selected, 3);
    assert_eq!(report.published, 2);
    assert_eq!(urls(&store), vec!["https://x/1", "https://x/3"]);
    assert!(store.is_fresh("https://x/2", DedupWindow::default(), now()));
}

#[tokio::test]
async fn top_n_limits_selection_and_fallback_is_reported() {
    let (store, report) = run_signal_cycle(
        SignalStore::new(),
        (1..=8).map(|i| candidate(&format!("https://x/{i}"))).collect(),
        "",
        &TakeFirst::new(Selection::Fallback),
        &RecordingPublisher::default(),
        &config(3),
        now(),
    )
    .await;

    assert_eq!(report.fresh, 8);
    assert_eq!(report.selected, 3);
    assert!(report.fallback);
    assert_eq!(store.len(), 3);
}
