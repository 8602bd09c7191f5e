use std::path::PathBuf;

use crate::app_config::{AppConfig, RepoRef};
use crate::ConfigError;

/// Read `.env` (if present), then build [`AppConfig`] from the environment.
///
/// # Errors
///
/// Returns `ConfigError` when `GITHUB_REPOSITORY` is missing or any value
/// fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Build [`AppConfig`] from the process environment only; `.env` is ignored.
///
/// # Errors
///
/// Same as [`load_app_config`].
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build [`AppConfig`] from an arbitrary key lookup (a `HashMap` in tests).
pub(crate) fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let github_repository = require("GITHUB_REPOSITORY")?
        .parse::<RepoRef>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "GITHUB_REPOSITORY".to_string(),
            reason: e.to_string(),
        })?;
    let github_token = optional("GITHUB_TOKEN");
    let github_api_url = or_default("SIGINTEL_GITHUB_API_URL", "https://api.github.com");

    let anthropic_api_key = optional("ANTHROPIC_API_KEY");
    let anthropic_api_url =
        or_default("SIGINTEL_ANTHROPIC_API_URL", "https://api.anthropic.com");
    let anthropic_model = or_default("SIGINTEL_ANTHROPIC_MODEL", "claude-sonnet-4-5-20250929");
    let anthropic_max_tokens = parse_u32("SIGINTEL_ANTHROPIC_MAX_TOKENS", "4096")?;

    let log_level = or_default("SIGINTEL_LOG_LEVEL", "info");
    let sources_path = PathBuf::from(or_default("SIGINTEL_SOURCES_PATH", "./config/sources.md"));
    let signals_path = PathBuf::from(or_default("SIGINTEL_SIGNALS_PATH", "./data/signals.json"));
    let policy_path = PathBuf::from(or_default(
        "SIGINTEL_POLICY_PATH",
        "./config/system-prompt.txt",
    ));
    let preference_summary_path = PathBuf::from(or_default(
        "SIGINTEL_PREFERENCE_SUMMARY_PATH",
        "./data/preference-summary.md",
    ));
    let people_report_path = PathBuf::from(or_default(
        "SIGINTEL_PEOPLE_REPORT_PATH",
        "./data/people-candidates.md",
    ));
    let policy_marker = or_default("SIGINTEL_POLICY_MARKER", "## RLHF Learned Preferences");
    if policy_marker.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "SIGINTEL_POLICY_MARKER".to_string(),
            reason: "must not be blank".to_string(),
        });
    }
    let signal_label = or_default("SIGINTEL_SIGNAL_LABEL", "signal-intel");

    let dedup_window_days = parse_u32("SIGINTEL_DEDUP_WINDOW_DAYS", "7")?;
    if dedup_window_days == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SIGINTEL_DEDUP_WINDOW_DAYS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let feedback_lookback_days = parse_u32("SIGINTEL_FEEDBACK_LOOKBACK_DAYS", "7")?;
    let top_signals = parse_usize("SIGINTEL_TOP_SIGNALS", "5")?;
    let preference_top_n = parse_usize("SIGINTEL_PREFERENCE_TOP_N", "10")?;

    let request_timeout_secs = parse_u64("SIGINTEL_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("SIGINTEL_USER_AGENT", "sigintel/0.1 (signal-intel)");
    let hn_max_stories = parse_usize("SIGINTEL_HN_MAX_STORIES", "30")?;
    let hn_max_concurrent = parse_usize("SIGINTEL_HN_MAX_CONCURRENT", "8")?;
    let reddit_max_posts = parse_usize("SIGINTEL_REDDIT_MAX_POSTS", "30")?;
    let github_max_releases = parse_usize("SIGINTEL_GITHUB_MAX_RELEASES", "5")?;

    let signals_cron = or_default("SIGINTEL_SIGNALS_CRON", "0 0 8 * * *");
    let feedback_cron = or_default("SIGINTEL_FEEDBACK_CRON", "0 0 7 * * MON");
    let people_cron = or_default("SIGINTEL_PEOPLE_CRON", "0 0 9 * * MON");

    Ok(AppConfig {
        log_level,
        github_repository,
        github_token,
        github_api_url,
        anthropic_api_key,
        anthropic_api_url,
        anthropic_model,
        anthropic_max_tokens,
        sources_path,
        signals_path,
        policy_path,
        preference_summary_path,
        people_report_path,
        policy_marker,
        signal_label,
        dedup_window_days,
        feedback_lookback_days,
        top_signals,
        preference_top_n,
        request_timeout_secs,
        user_agent,
        hn_max_stories,
        hn_max_concurrent,
        reddit_max_posts,
        github_max_releases,
        signals_cron,
        feedback_cron,
        people_cron,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
