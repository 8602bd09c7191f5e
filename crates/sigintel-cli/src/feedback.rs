//! `feedback` command: reactions → preference summary → policy document.

use anyhow::Context;
use chrono::Utc;
use sigintel_core::persist::write_atomic;
use sigintel_core::AppConfig;
use sigintel_feedback::{
    harvest_preferences, updated_policy, FeedbackConfig, PolicyDocument, SUMMARY_LIMIT,
};
use sigintel_github::IssueTracker;

use crate::git;

/// Harvest reactions on digests from the lookback window and fold them into
/// the policy document.
///
/// The preference summary is always rewritten. The policy document is only
/// rewritten when at least one signal was liked or disliked.
///
/// # Errors
///
/// Returns an error if the issue listing fails, the policy document cannot
/// be read or written, the summary cannot be written, or (with `commit`) the
/// git push fails.
pub(crate) async fn run_feedback(
    config: &AppConfig,
    dry_run: bool,
    commit: bool,
) -> anyhow::Result<()> {
    let tracker = IssueTracker::new(
        crate::github_client(config)?,
        config.github_repository.clone(),
    );
    let feedback_config = FeedbackConfig {
        label: config.signal_label.clone(),
        lookback_days: config.feedback_lookback_days,
        policy_top_n: config.preference_top_n,
        marker: config.policy_marker.clone(),
    };

    let now = Utc::now();
    let harvest = harvest_preferences(&tracker, &feedback_config, now).await?;
    let prefs = &harvest.preferences;
    let summary = prefs.summary(SUMMARY_LIMIT);

    let existing = PolicyDocument::load(&config.policy_path)?;
    let policy = updated_policy(&existing, prefs, &feedback_config);

    if dry_run {
        println!(
            "dry-run: {} issues, {} comments: {} liked, {} disliked, {} neutral, {} without votes",
            harvest.issues,
            harvest.comments,
            prefs.liked.len(),
            prefs.disliked.len(),
            prefs.neutral.len(),
            prefs.dropped
        );
        println!("{summary}");
        match &policy {
            Some(_) => println!("dry-run: would update {}", config.policy_path.display()),
            None => println!("dry-run: policy unchanged"),
        }
        return Ok(());
    }

    write_atomic(&config.preference_summary_path, &summary).with_context(|| {
        format!(
            "failed to write preference summary {}",
            config.preference_summary_path.display()
        )
    })?;

    let mut changed = vec![config.preference_summary_path.as_path()];
    if let Some(policy) = &policy {
        policy.save(&config.policy_path)?;
        changed.push(config.policy_path.as_path());
    }

    println!(
        "feedback complete: {} liked, {} disliked across {} issues; policy {}",
        prefs.liked.len(),
        prefs.disliked.len(),
        harvest.issues,
        if policy.is_some() { "updated" } else { "unchanged" }
    );

    if commit {
        let message = format!("chore: update ranking policy ({})", now.format("%Y-%m-%d"));
        git::commit_and_push(&changed, &message).await?;
    }

    Ok(())
}
