//! Commit and push persisted state from inside a CI checkout.

use std::path::Path;

use anyhow::{bail, Context};
use tokio::process::Command;

const BOT_NAME: &str = "GitHub Actions Bot";
const BOT_EMAIL: &str = "actions@github.com";

/// Stage `files`, then commit and push if anything changed.
///
/// Returns `false` when the staged tree matches `HEAD` and no commit was made.
///
/// # Errors
///
/// Returns an error if any git invocation cannot be spawned or exits
/// unsuccessfully.
pub(crate) async fn commit_and_push(files: &[&Path], message: &str) -> anyhow::Result<bool> {
    git(&["config", "user.name", BOT_NAME]).await?;
    git(&["config", "user.email", BOT_EMAIL]).await?;

    for file in files {
        let path = file.to_string_lossy();
        git(&["add", path.as_ref()]).await?;
        tracing::debug!(file = %path, "staged");
    }

    let diff = Command::new("git")
        .args(["diff", "--cached", "--quiet"])
        .status()
        .await
        .context("failed to run git diff")?;
    if diff.success() {
        tracing::info!("no state changes to commit");
        println!("no changes to commit");
        return Ok(false);
    }

    git(&["commit", "-m", message]).await?;
    git(&["push"]).await?;
    tracing::info!(message, "committed and pushed state");
    println!("committed and pushed: {message}");
    Ok(true)
}

async fn git(args: &[&str]) -> anyhow::Result<()> {
    let output = Command::new("git")
        .args(args)
        .output()
        .await
        .with_context(|| format!("failed to run git {}", args.join(" ")))?;
    if !output.status.success() {
        bail!(
            "git {} exited with {}: {}",
            args.join(" "),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}
