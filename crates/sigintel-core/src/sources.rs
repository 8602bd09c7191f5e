//! Feed source lists loaded from `config/sources.md`.
//!
//! The file is a markdown document with one `##` section per source kind and
//! one `- item` bullet per entry:
//!
//! ```markdown
//! ## GitHub Repositories
//! - tokio-rs/tokio
//!
//! ## Reddit Subreddits
//! - r/rust
//! ```
//!
//! Unknown `##` sections are ignored, as are single-`#` comment lines.

use std::path::Path;

use crate::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourcesConfig {
    /// `owner/repo` strings whose releases are collected. Not validated here;
    /// malformed entries are skipped (with a warning) by the fetchers.
    pub github_repos: Vec<String>,
    /// Subreddit names without the `r/` prefix.
    pub subreddits: Vec<String>,
    /// Account handles without the `@` prefix. Listed for completeness; no
    /// fetcher consumes them.
    pub twitter_accounts: Vec<String>,
    /// `owner/repo` strings scanned for contributor discovery.
    pub people_watcher_repos: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    GithubRepos,
    TwitterAccounts,
    Subreddits,
    PeopleWatcherRepos,
}

/// Read and parse the sources file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::SourcesFileIo`] if the file cannot be read.
pub fn load_sources(path: &Path) -> Result<SourcesConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let sources = parse_sources(&content);
    tracing::info!(
        github_repos = sources.github_repos.len(),
        subreddits = sources.subreddits.len(),
        twitter_accounts = sources.twitter_accounts.len(),
        people_watcher_repos = sources.people_watcher_repos.len(),
        "loaded sources"
    );
    Ok(sources)
}

/// Like [`load_sources`], but an unreadable file is logged at `warn` and
/// yields empty source lists.
#[must_use]
pub fn load_sources_or_default(path: &Path) -> SourcesConfig {
    match load_sources(path) {
        Ok(sources) => sources,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to load sources; using empty lists"
            );
            SourcesConfig::default()
        }
    }
}

/// Parse the markdown sources document.
#[must_use]
pub fn parse_sources(content: &str) -> SourcesConfig {
    let mut sources = SourcesConfig::default();
    let mut current: Option<Section> = None;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with("##") {
            current = section_for_heading(trimmed);
            continue;
        }

        // Single `#` lines are comments.
        if trimmed.starts_with('#') {
            continue;
        }

        let (Some(section), Some(item)) = (current, trimmed.strip_prefix('-')) else {
            continue;
        };
        let item = item.trim();
        if item.is_empty() {
            continue;
        }

        match section {
            Section::GithubRepos => sources.github_repos.push(item.to_string()),
            Section::TwitterAccounts => {
                let account = item.strip_prefix('@').unwrap_or(item);
                sources.twitter_accounts.push(account.to_string());
            }
            Section::Subreddits => {
                let subreddit = item.strip_prefix("r/").unwrap_or(item);
                sources.subreddits.push(subreddit.to_string());
            }
            Section::PeopleWatcherRepos => sources.people_watcher_repos.push(item.to_string()),
        }
    }

    sources
}

fn section_for_heading(heading: &str) -> Option<Section> {
    if heading.starts_with("## GitHub Repositories") {
        Some(Section::GithubRepos)
    } else if heading.starts_with("## Twitter Accounts") {
        Some(Section::TwitterAccounts)
    } else if heading.starts_with("## Reddit Subreddits") {
        Some(Section::Subreddits)
    } else if heading.starts_with("## People Watcher Target Repos") {
        Some(Section::PeopleWatcherRepos)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "sources_test.rs"]
mod tests;
