//! Candidate fetchers for HackerNews, Reddit, and GitHub releases.
//!
//! Each source degrades independently: a failing source contributes nothing
//! to the batch and the rest proceed.

pub mod error;

mod collect;
mod github;
mod hackernews;
mod reddit;

use std::time::Duration;

use serde::de::DeserializeOwned;
use sigintel_core::AppConfig;

pub use collect::collect_candidates;
pub use error::SourceError;
pub use github::{fetch_github_releases, fetch_repo_releases};

pub const DEFAULT_HN_BASE_URL: &str = "https://hacker-news.firebaseio.com";
pub const DEFAULT_REDDIT_BASE_URL: &str = "https://www.reddit.com";

/// Endpoints and per-source limits.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub hn_base_url: String,
    pub reddit_base_url: String,
    pub hn_max_stories: usize,
    pub hn_max_concurrent: usize,
    pub reddit_max_posts: usize,
    pub github_max_releases: usize,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl FetchSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            hn_max_stories: config.hn_max_stories,
            hn_max_concurrent: config.hn_max_concurrent,
            reddit_max_posts: config.reddit_max_posts,
            github_max_releases: config.github_max_releases,
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            ..Self::default()
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            hn_base_url: DEFAULT_HN_BASE_URL.to_string(),
            reddit_base_url: DEFAULT_REDDIT_BASE_URL.to_string(),
            hn_max_stories: 30,
            hn_max_concurrent: 8,
            reddit_max_posts: 30,
            github_max_releases: 5,
            timeout_secs: 10,
            user_agent: "sigintel/0.1 (signal-intel)".to_string(),
        }
    }
}

/// Shared HTTP client for the public, unauthenticated feeds.
pub struct SourceClient {
    http: reqwest::Client,
    settings: FetchSettings,
}

impl SourceClient {
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(settings: FetchSettings) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .build()?;
        Ok(Self { http, settings })
    }

    #[must_use]
    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        context: &str,
    ) -> Result<T, SourceError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                context: context.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SourceError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}
