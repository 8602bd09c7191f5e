use std::path::PathBuf;
use std::str::FromStr;

use crate::ConfigError;

/// A GitHub repository reference in `owner/repo` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoRef {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut parts = trimmed.splitn(2, '/');
        let owner = parts.next().unwrap_or_default().trim();
        let name = parts.next().unwrap_or_default().trim();
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(ConfigError::InvalidRepo(s.to_string()));
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub github_repository: RepoRef,
    pub github_token: Option<String>,
    pub github_api_url: String,
    pub anthropic_api_key: Option<String>,
    pub anthropic_api_url: String,
    pub anthropic_model: String,
    pub anthropic_max_tokens: u32,
    pub sources_path: PathBuf,
    pub signals_path: PathBuf,
    pub policy_path: PathBuf,
    pub preference_summary_path: PathBuf,
    pub people_report_path: PathBuf,
    pub policy_marker: String,
    pub signal_label: String,
    pub dedup_window_days: u32,
    pub feedback_lookback_days: u32,
    pub top_signals: usize,
    pub preference_top_n: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub hn_max_stories: usize,
    pub hn_max_concurrent: usize,
    pub reddit_max_posts: usize,
    pub github_max_releases: usize,
    pub signals_cron: String,
    pub feedback_cron: String,
    pub people_cron: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("github_repository", &self.github_repository)
            .field(
                "github_token",
                &self.github_token.as_ref().map(|_| "[redacted]"),
            )
            .field("github_api_url", &self.github_api_url)
            .field(
                "anthropic_api_key",
                &self.anthropic_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("anthropic_api_url", &self.anthropic_api_url)
            .field("anthropic_model", &self.anthropic_model)
            .field("anthropic_max_tokens", &self.anthropic_max_tokens)
            .field("sources_path", &self.sources_path)
            .field("signals_path", &self.signals_path)
            .field("policy_path", &self.policy_path)
            .field("preference_summary_path", &self.preference_summary_path)
            .field("people_report_path", &self.people_report_path)
            .field("policy_marker", &self.policy_marker)
            .field("signal_label", &self.signal_label)
            .field("dedup_window_days", &self.dedup_window_days)
            .field("feedback_lookback_days", &self.feedback_lookback_days)
            .field("top_signals", &self.top_signals)
            .field("preference_top_n", &self.preference_top_n)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("hn_max_stories", &self.hn_max_stories)
            .field("hn_max_concurrent", &self.hn_max_concurrent)
            .field("reddit_max_posts", &self.reddit_max_posts)
            .field("github_max_releases", &self.github_max_releases)
            .field("signals_cron", &self.signals_cron)
            .field("feedback_cron", &self.feedback_cron)
            .field("people_cron", &self.people_cron)
            .finish()
    }
}
