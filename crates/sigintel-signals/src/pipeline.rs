//! One signal-intel cycle: compact → filter fresh → rank → publish → record.
//!
//! Persistence stays with the caller: the returned store must be saved, and a
//! failed save is fatal for the run.

use chrono::{DateTime, Utc};
use sigintel_core::{Candidate, IssueRef, Publisher, Ranker, SelectedItem};

use crate::digest::{issue_body, issue_title, signal_comment};
use crate::store::{DedupWindow, SignalStore};

#[derive(Debug, Clone)]
pub struct CycleConfig {
    pub window: DedupWindow,
    pub top_n: usize,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub candidates: usize,
    pub fresh: usize,
    pub selected: usize,
    pub published: usize,
    pub evicted: usize,
    pub fallback: bool,
    pub issue: Option<IssueRef>,
}

/// Store after compaction plus the candidates that survived freshness
/// filtering.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub store: SignalStore,
    pub fresh: Vec<Candidate>,
    pub evicted: usize,
}

/// Compact the store and filter `candidates` against it.
///
/// Compaction happens unconditionally so the store stays bounded even on
/// runs that publish nothing.
#[must_use]
pub fn prepare(
    store: SignalStore,
    candidates: Vec<Candidate>,
    window: DedupWindow,
    now: DateTime<Utc>,
) -> Prepared {
    let before = store.len();
    let store = store.compact(window, now);
    let evicted = before - store.len();

    let total = candidates.len();
    let fresh = store.filter_fresh(candidates, window, now);
    tracing::info!(
        candidates = total,
        fresh = fresh.len(),
        stored = store.len(),
        "filtered candidates against signal store"
    );

    Prepared {
        store,
        fresh,
        evicted,
    }
}

/// Publish `selected` as one digest issue with a comment per item.
///
/// Returns the created issue (if any) and the items whose comment was posted.
/// A failed issue creation publishes nothing; a failed comment skips only
/// that item.
pub async fn publish_selection<'a, P>(
    publisher: &P,
    selected: &'a [SelectedItem],
    fresh_count: usize,
    labels: &[String],
    now: DateTime<Utc>,
) -> (Option<IssueRef>, Vec<&'a SelectedItem>)
where
    P: Publisher + ?Sized,
{
    let title = issue_title(now);
    let body = issue_body(selected, fresh_count);

    let issue = match publisher.create_issue(&title, &body, labels).await {
        Ok(issue) => issue,
        Err(e) => {
            tracing::error!(error = %e, title = %title, "failed to create digest issue");
            return (None, Vec::new());
        }
    };
    tracing::info!(issue = issue.number, url = %issue.url, "created digest issue");

    let mut published = Vec::with_capacity(selected.len());
    for (i, item) in selected.iter().enumerate() {
        let comment = signal_comment(i + 1, item);
        match publisher.post_comment(issue.number, &comment).await {
            Ok(_) => published.push(item),
            Err(e) => {
                tracing::warn!(
                    issue = issue.number,
                    url = %item.candidate.url,
                    error = %e,
                    "failed to post signal comment"
                );
            }
        }
    }

    (Some(issue), published)
}

/// Run a full cycle and return the updated store with a report.
///
/// Only items that were actually published are recorded, so anything that
/// failed to post stays fresh for the next run.
pub async fn run_signal_cycle<R, P>(
    store: SignalStore,
    candidates: Vec<Candidate>,
    policy: &str,
    ranker: &R,
    publisher: &P,
    config: &CycleConfig,
    now: DateTime<Utc>,
) -> (SignalStore, CycleReport)
where
    R: Ranker + ?Sized,
    P: Publisher + ?Sized,
{
    let candidate_count = candidates.len();
    let Prepared {
        mut store,
        fresh,
        evicted,
    } = prepare(store, candidates, config.window, now);

    let mut report = CycleReport {
        candidates: candidate_count,
        fresh: fresh.len(),
        evicted,
        ..CycleReport::default()
    };

    if fresh.is_empty() {
        tracing::info!("no new signals this cycle");
        return (store, report);
    }

    let selected = ranker.rank(&fresh, policy, config.top_n).await;
    report.selected = selected.len();
    report.fallback = selected.iter().any(SelectedItem::is_fallback);

    let (issue, published) =
        publish_selection(publisher, &selected, fresh.len(), &config.labels, now).await;

    for item in &published {
        let c = &item.candidate;
        store.record(&c.url, &c.title, c.source.clone(), now);
    }
    report.published = published.len();
    report.issue = issue;

    tracing::info!(
        selected = report.selected,
        published = report.published,
        fallback = report.fallback,
        "signal cycle complete"
    );

    (store, report)
}
