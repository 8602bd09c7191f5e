use std::collections::HashSet;

use sigintel_core::{Candidate, SourcesConfig};
use sigintel_github::GithubClient;

use crate::github::fetch_github_releases;
use crate::SourceClient;

/// Gather candidates from every configured source.
///
/// Continues past individual source failures, logging warnings. Candidates
/// are ordered HackerNews, Reddit, then GitHub; a URL seen earlier in that
/// order wins over later repeats.
pub async fn collect_candidates(
    client: &SourceClient,
    github: &GithubClient,
    sources: &SourcesConfig,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    match client.fetch_hacker_news().await {
        Ok(stories) => candidates.extend(stories),
        Err(e) => {
            tracing::warn!(source = "hackernews", error = %e, "HackerNews fetch failed");
        }
    }

    candidates.extend(client.fetch_reddit(&sources.subreddits).await);

    candidates.extend(
        fetch_github_releases(
            github,
            &sources.github_repos,
            client.settings().github_max_releases,
        )
        .await,
    );

    if !sources.twitter_accounts.is_empty() {
        tracing::debug!(
            accounts = sources.twitter_accounts.len(),
            "twitter accounts configured but not fetched"
        );
    }

    let total = candidates.len();
    let mut seen: HashSet<String> = HashSet::new();
    candidates.retain(|c| seen.insert(c.url.clone()));

    tracing::info!(
        total,
        unique = candidates.len(),
        "collected candidates"
    );
    candidates
}
