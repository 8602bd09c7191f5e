//! Wire shapes for the handful of GitHub REST endpoints we touch.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sigintel_core::{ReactionCounts, ReactionKind};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    /// Present when the "issue" is actually a pull request.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl Issue {
    #[must_use]
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueComment {
    pub id: u64,
    #[serde(default)]
    pub body: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub reactions: ReactionRollup,
}

/// The per-comment `reactions` summary GitHub embeds in comment payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReactionRollup {
    #[serde(rename = "+1", default)]
    pub thumbs_up: u32,
    #[serde(rename = "-1", default)]
    pub thumbs_down: u32,
    #[serde(default)]
    pub laugh: u32,
    #[serde(default)]
    pub confused: u32,
    #[serde(default)]
    pub heart: u32,
    #[serde(default)]
    pub hooray: u32,
    #[serde(default)]
    pub rocket: u32,
    #[serde(default)]
    pub eyes: u32,
}

impl From<&ReactionRollup> for ReactionCounts {
    fn from(r: &ReactionRollup) -> Self {
        ReactionCounts::new()
            .with(ReactionKind::ThumbsUp, r.thumbs_up)
            .with(ReactionKind::ThumbsDown, r.thumbs_down)
            .with(ReactionKind::Laugh, r.laugh)
            .with(ReactionKind::Confused, r.confused)
            .with(ReactionKind::Heart, r.heart)
            .with(ReactionKind::Hooray, r.hooray)
            .with(ReactionKind::Rocket, r.rocket)
            .with(ReactionKind::Eyes, r.eyes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub name: Option<String>,
    pub tag_name: String,
    pub html_url: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
}

impl Release {
    /// Release name, or the tag when the name is missing or blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.tag_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepoContributor {
    pub login: String,
    pub contributions: u64,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}
