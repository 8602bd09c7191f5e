//! Narrow interfaces for the I/O collaborators the pipelines drive.
//!
//! Concrete implementations live in `sigintel-ranker` and `sigintel-github`;
//! tests substitute in-memory fakes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::feedback::IssueFeedback;
use crate::types::{Candidate, SelectedItem};

/// Picks the most relevant candidates, biased by the policy document.
///
/// Never fails: when the ranking call errors or its output cannot be mapped
/// back to input URLs, implementations return the first `top_n` candidates
/// flagged as [`crate::Selection::Fallback`].
#[async_trait]
pub trait Ranker: Send + Sync {
    async fn rank(&self, candidates: &[Candidate], policy: &str, top_n: usize)
        -> Vec<SelectedItem>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef {
    pub number: u64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRef {
    pub id: u64,
    pub url: String,
}

/// Publishes digests where readers can react to them.
#[async_trait]
pub trait Publisher: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn create_issue(
        &self,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> Result<IssueRef, Self::Error>;

    async fn post_comment(&self, issue_number: u64, body: &str) -> Result<CommentRef, Self::Error>;
}

/// Supplies reaction data for previously published digests.
#[async_trait]
pub trait FeedbackSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issues carrying `label` updated since `since`, with per-comment
    /// reactions. Implementations skip individual issues whose comments cannot
    /// be read rather than failing the whole batch.
    async fn issues_with_feedback(
        &self,
        label: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<IssueFeedback>, Self::Error>;
}
