//! `signals` command: collect → dedup → rank → publish → record.

use chrono::Utc;
use sigintel_core::AppConfig;
use sigintel_feedback::PolicyDocument;
use sigintel_github::IssueTracker;
use sigintel_ranker::{AnthropicRanker, RankerSettings};
use sigintel_signals::{prepare, run_signal_cycle, CycleConfig, DedupWindow, SignalStore};
use sigintel_sources::{collect_candidates, FetchSettings, SourceClient};

use crate::git;

/// Run one signal cycle against the live sources.
///
/// Source failures only shrink the candidate pool and publish failures only
/// shrink what gets recorded, so the cycle itself does not fail on them.
/// Saving the store does: losing it would republish everything next run.
///
/// When `dry_run` is `true`, prints the fresh candidates and returns without
/// calling the ranker, publishing, or writing the store.
///
/// # Errors
///
/// Returns an error if the policy document cannot be read,
/// an HTTP client cannot be built, the store cannot be saved, or (with
/// `commit`) the git push fails.
pub(crate) async fn run_signals(
    config: &AppConfig,
    dry_run: bool,
    commit: bool,
) -> anyhow::Result<()> {
    let sources = sigintel_core::load_sources_or_default(&config.sources_path);
    let github = crate::github_client(config)?;
    let fetcher = SourceClient::new(FetchSettings::from_app_config(config))?;

    let candidates = collect_candidates(&fetcher, &github, &sources).await;
    let store = SignalStore::load(&config.signals_path);
    let window = DedupWindow::days(config.dedup_window_days);
    let now = Utc::now();

    if dry_run {
        let prepared = prepare(store, candidates, window, now);
        println!(
            "dry-run: would rank {} fresh signals (top {}), evicting {} expired entries",
            prepared.fresh.len(),
            config.top_signals,
            prepared.evicted
        );
        for c in &prepared.fresh {
            println!("  [{}] {} {}", c.source.label(), c.title, c.url);
        }
        return Ok(());
    }

    let policy = PolicyDocument::load(&config.policy_path)?;
    let ranker = AnthropicRanker::new(RankerSettings::from_app_config(config))?;
    let tracker = IssueTracker::new(github, config.github_repository.clone());
    let cycle = CycleConfig {
        window,
        top_n: config.top_signals,
        labels: vec![config.signal_label.clone()],
    };

    let (store, report) = run_signal_cycle(
        store,
        candidates,
        policy.text(),
        &ranker,
        &tracker,
        &cycle,
        now,
    )
    .await;
    store.save(&config.signals_path)?;

    match &report.issue {
        Some(issue) => println!(
            "signals complete: {} candidates, {} fresh, {} published to {}{}",
            report.candidates,
            report.fresh,
            report.published,
            issue.url,
            if report.fallback { " (fallback ranking)" } else { "" }
        ),
        None => println!(
            "signals complete: {} candidates, {} fresh, nothing published",
            report.candidates, report.fresh
        ),
    }

    if commit {
        let message = format!("chore: update signal store ({})", now.format("%Y-%m-%d"));
        git::commit_and_push(&[config.signals_path.as_path()], &message).await?;
    }

    Ok(())
}
