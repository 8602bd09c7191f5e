//! `people` command: contributor discovery report.

use anyhow::Context;
use chrono::Utc;
use sigintel_core::persist::write_atomic;
use sigintel_core::AppConfig;
use sigintel_people::{
    discover_contributors, format_candidates_markdown, rank_contributors, REPORT_LIMIT,
};

use crate::git;

pub(crate) async fn run_people(
    config: &AppConfig,
    dry_run: bool,
    commit: bool,
) -> anyhow::Result<()> {
    let sources = sigintel_core::load_sources_or_default(&config.sources_path);
    if sources.people_watcher_repos.is_empty() {
        println!("no people-watcher repositories configured; nothing to do");
        return Ok(());
    }

    let github = crate::github_client(config)?;
    let contributors = discover_contributors(&github, &sources.people_watcher_repos).await;
    let ranked = rank_contributors(contributors);

    let now = Utc::now();
    let report = format_candidates_markdown(&ranked, now, REPORT_LIMIT);

    if dry_run {
        println!(
            "dry-run: would write {} ranked contributors to {}",
            ranked.len().min(REPORT_LIMIT),
            config.people_report_path.display()
        );
        println!("{report}");
        return Ok(());
    }

    write_atomic(&config.people_report_path, &report).with_context(|| {
        format!(
            "failed to write people report {}",
            config.people_report_path.display()
        )
    })?;
    println!(
        "people complete: {} contributors across {} repositories",
        ranked.len(),
        sources.people_watcher_repos.len()
    );

    if commit {
        let message = format!("chore: update people candidates ({})", now.format("%Y-%m-%d"));
        git::commit_and_push(&[config.people_report_path.as_path()], &message).await?;
    }

    Ok(())
}
