//! A [`GithubClient`] bound to the repository digests are published to.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sigintel_core::{
    CommentFeedback, CommentRef, FeedbackSource, IssueFeedback, IssueRef, Publisher,
    ReactionCounts, RepoRef,
};

use crate::client::GithubClient;
use crate::error::GithubError;

pub struct IssueTracker {
    client: GithubClient,
    repo: RepoRef,
}

impl IssueTracker {
    #[must_use]
    pub fn new(client: GithubClient, repo: RepoRef) -> Self {
        Self { client, repo }
    }
}

#[async_trait]
impl Publisher for IssueTracker {
    type Error = GithubError;

    async fn create_issue(
        &self,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> Result<IssueRef, GithubError> {
        let issue = self.client.create_issue(&self.repo, title, body, labels).await?;
        Ok(IssueRef {
            number: issue.number,
            url: issue.html_url,
        })
    }

    async fn post_comment(&self, issue_number: u64, body: &str) -> Result<CommentRef, GithubError> {
        let comment = self.client.create_comment(&self.repo, issue_number, body).await?;
        Ok(CommentRef {
            id: comment.id,
            url: comment.html_url,
        })
    }
}

#[async_trait]
impl FeedbackSource for IssueTracker {
    type Error = GithubError;

    async fn issues_with_feedback(
        &self,
        label: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<IssueFeedback>, GithubError> {
        let issues = self
            .client
            .list_issues_with_label(&self.repo, label, since)
            .await?;

        let mut feedback = Vec::with_capacity(issues.len());
        for issue in issues {
            let listed = self
                .client
                .list_issue_comments(&self.repo, issue.number)
                .await;
            let comments = match listed {
                Ok(comments) => comments,
                Err(e) => {
                    tracing::warn!(
                        repo = %self.repo,
                        issue = issue.number,
                        error = %e,
                        "skipping issue: failed to fetch comments"
                    );
                    continue;
                }
            };

            tracing::debug!(
                issue = issue.number,
                comments = comments.len(),
                "fetched comment reactions"
            );
            feedback.push(IssueFeedback {
                number: issue.number,
                title: issue.title,
                comments: comments
                    .into_iter()
                    .map(|c| CommentFeedback {
                        comment_id: c.id,
                        reactions: ReactionCounts::from(&c.reactions),
                        body: c.body.unwrap_or_default(),
                        url: c.html_url,
                    })
                    .collect(),
            });
        }

        Ok(feedback)
    }
}
