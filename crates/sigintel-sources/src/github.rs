use sigintel_core::{Candidate, RepoRef, Source};
use sigintel_github::GithubClient;

use crate::error::SourceError;

/// Recent releases of one repository as candidates titled `owner/repo: name`.
///
/// # Errors
///
/// Returns [`SourceError::InvalidRepo`] for a reference that is not
/// `owner/repo`, or [`SourceError::Github`] when the listing fails.
pub async fn fetch_repo_releases(
    github: &GithubClient,
    repo: &str,
    limit: usize,
) -> Result<Vec<Candidate>, SourceError> {
    let repo_ref: RepoRef = repo
        .parse()
        .map_err(|_| SourceError::InvalidRepo(repo.to_string()))?;
    let releases = github.list_releases(&repo_ref, limit).await?;

    Ok(releases
        .into_iter()
        .filter(|r| !r.draft)
        .map(|r| Candidate {
            title: format!("{repo_ref}: {}", r.display_name()),
            url: r.html_url.clone(),
            source: Source::GitHub,
            score: None,
        })
        .collect())
}

/// Releases across `repos`; malformed or failing repositories are skipped.
pub async fn fetch_github_releases(
    github: &GithubClient,
    repos: &[String],
    limit: usize,
) -> Vec<Candidate> {
    let mut releases = Vec::new();
    for repo in repos {
        match fetch_repo_releases(github, repo, limit).await {
            Ok(found) => {
                tracing::debug!(repo = %repo, count = found.len(), "fetched releases");
                releases.extend(found);
            }
            Err(e) => {
                tracing::warn!(repo = %repo, error = %e, "skipping repository releases");
            }
        }
    }
    tracing::info!(
        repos = repos.len(),
        count = releases.len(),
        "fetched GitHub releases"
    );
    releases
}
