//! Reaction data harvested from previously published comments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// GitHub reaction content values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReactionKind {
    #[serde(rename = "+1")]
    ThumbsUp,
    #[serde(rename = "-1")]
    ThumbsDown,
    #[serde(rename = "laugh")]
    Laugh,
    #[serde(rename = "confused")]
    Confused,
    #[serde(rename = "heart")]
    Heart,
    #[serde(rename = "hooray")]
    Hooray,
    #[serde(rename = "rocket")]
    Rocket,
    #[serde(rename = "eyes")]
    Eyes,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 8] = [
        ReactionKind::ThumbsUp,
        ReactionKind::ThumbsDown,
        ReactionKind::Laugh,
        ReactionKind::Confused,
        ReactionKind::Heart,
        ReactionKind::Hooray,
        ReactionKind::Rocket,
        ReactionKind::Eyes,
    ];

    /// The wire value GitHub uses for this reaction.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ReactionKind::ThumbsUp => "+1",
            ReactionKind::ThumbsDown => "-1",
            ReactionKind::Laugh => "laugh",
            ReactionKind::Confused => "confused",
            ReactionKind::Heart => "heart",
            ReactionKind::Hooray => "hooray",
            ReactionKind::Rocket => "rocket",
            ReactionKind::Eyes => "eyes",
        }
    }
}

/// Per-kind reaction counts for one comment. Every kind is retained even
/// though only thumbs up/down feed the sentiment score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCounts(BTreeMap<ReactionKind, u32>);

impl ReactionCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly useful when assembling fixtures.
    #[must_use]
    pub fn with(mut self, kind: ReactionKind, count: u32) -> Self {
        self.set(kind, count);
        self
    }

    pub fn set(&mut self, kind: ReactionKind, count: u32) {
        if count == 0 {
            self.0.remove(&kind);
        } else {
            self.0.insert(kind, count);
        }
    }

    pub fn increment(&mut self, kind: ReactionKind) {
        *self.0.entry(kind).or_insert(0) += 1;
    }

    #[must_use]
    pub fn count(&self, kind: ReactionKind) -> u32 {
        self.0.get(&kind).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn upvotes(&self) -> u32 {
        self.count(ReactionKind::ThumbsUp)
    }

    #[must_use]
    pub fn downvotes(&self) -> u32 {
        self.count(ReactionKind::ThumbsDown)
    }

    /// Count of every reaction kind, thumbs or otherwise.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }
}

impl FromIterator<ReactionKind> for ReactionCounts {
    fn from_iter<I: IntoIterator<Item = ReactionKind>>(iter: I) -> Self {
        let mut counts = Self::default();
        for kind in iter {
            counts.increment(kind);
        }
        counts
    }
}

/// A published comment together with the reactions it received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentFeedback {
    pub comment_id: u64,
    pub body: String,
    pub url: String,
    pub reactions: ReactionCounts,
}

/// A published digest issue and its comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueFeedback {
    pub number: u64,
    pub title: String,
    pub comments: Vec<CommentFeedback>,
}
