//! Harvest reactions from published digests and fold them into the policy.

use chrono::{DateTime, Duration, Utc};
use sigintel_core::FeedbackSource;

use crate::error::FeedbackError;
use crate::policy::{render_policy, PolicyDocument};
use crate::reactions::{analyze_reactions, PreferenceSet};

#[derive(Debug, Clone)]
pub struct FeedbackConfig {
    pub label: String,
    pub lookback_days: u32,
    /// Entries listed per direction in the policy text.
    pub policy_top_n: usize,
    pub marker: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Harvest {
    pub issues: usize,
    pub comments: usize,
    pub preferences: PreferenceSet,
}

/// Pull reaction data for issues touched within the lookback window and
/// reduce it to a [`PreferenceSet`].
///
/// # Errors
///
/// Returns [`FeedbackError::Source`] when the issue listing itself fails.
pub async fn harvest_preferences<S>(
    source: &S,
    config: &FeedbackConfig,
    now: DateTime<Utc>,
) -> Result<Harvest, FeedbackError>
where
    S: FeedbackSource + ?Sized,
{
    let since = now - Duration::days(i64::from(config.lookback_days));
    let issues = source
        .issues_with_feedback(&config.label, since)
        .await
        .map_err(|e| FeedbackError::Source(Box::new(e)))?;

    let comments = issues.iter().map(|i| i.comments.len()).sum();
    tracing::info!(
        issues = issues.len(),
        comments,
        label = %config.label,
        since = %since.to_rfc3339(),
        "fetched feedback"
    );

    Ok(Harvest {
        issues: issues.len(),
        comments,
        preferences: analyze_reactions(&issues),
    })
}

/// The policy document with its learned section rebuilt from `preferences`.
///
/// Returns `None` when there is nothing to learn, leaving the existing
/// section in place.
#[must_use]
pub fn updated_policy(
    existing: &PolicyDocument,
    preferences: &PreferenceSet,
    config: &FeedbackConfig,
) -> Option<PolicyDocument> {
    if preferences.is_empty() {
        tracing::info!("no liked or disliked signals; policy left unchanged");
        return None;
    }
    let text = render_policy(preferences, config.policy_top_n);
    Some(existing.merged(&text, &config.marker))
}
