//! Reduces per-comment reactions into liked / disliked / neutral groups.
//!
//! Only thumbs up and thumbs down carry sentiment. A comment with neither is
//! dropped entirely, even if it collected other reactions.

use sigintel_core::IssueFeedback;

/// Entries per direction in [`PreferenceSet::summary`] reports.
pub const SUMMARY_LIMIT: usize = 5;

/// One comment's reaction tally, flattened together with its issue title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEntry {
    /// Raw comment body.
    pub content: String,
    pub url: String,
    /// `upvotes - downvotes`.
    pub score: i64,
    pub upvotes: u32,
    pub downvotes: u32,
    pub issue_title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceSet {
    /// Positive score, highest first.
    pub liked: Vec<ReactionEntry>,
    /// Negative score, most negative first.
    pub disliked: Vec<ReactionEntry>,
    /// Thumbs reactions that cancel out, in input order.
    pub neutral: Vec<ReactionEntry>,
    /// Comments without any thumbs reaction.
    pub dropped: usize,
}

impl PreferenceSet {
    /// `true` when there is nothing to learn from.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.liked.is_empty() && self.disliked.is_empty()
    }

    /// Human-readable digest of the strongest signals in each direction.
    ///
    /// Lists up to `limit` liked and disliked entries with the title of the
    /// issue they were posted on and the comment URL.
    #[must_use]
    pub fn summary(&self, limit: usize) -> String {
        let mut out = String::from("# RLHF Preference Summary\n\n");

        if !self.liked.is_empty() {
            out.push_str(&format!(
                "## Highly Valued Signals (+{})\n\n",
                self.liked.len()
            ));
            for entry in self.liked.iter().take(limit) {
                out.push_str(&format!(
                    "- [+{}] {}\n  {}\n\n",
                    entry.score, entry.issue_title, entry.url
                ));
            }
        }

        if !self.disliked.is_empty() {
            out.push_str(&format!(
                "## Low Value Signals (-{})\n\n",
                self.disliked.len()
            ));
            for entry in self.disliked.iter().take(limit) {
                out.push_str(&format!(
                    "- [{}] {}\n  {}\n\n",
                    entry.score, entry.issue_title, entry.url
                ));
            }
        }

        out
    }
}

/// Partition every comment across `issues` by net thumbs sentiment.
#[must_use]
pub fn analyze_reactions(issues: &[IssueFeedback]) -> PreferenceSet {
    let mut set = PreferenceSet::default();

    for issue in issues {
        for comment in &issue.comments {
            let upvotes = comment.reactions.upvotes();
            let downvotes = comment.reactions.downvotes();
            let score = i64::from(upvotes) - i64::from(downvotes);

            let entry = ReactionEntry {
                content: comment.body.clone(),
                url: comment.url.clone(),
                score,
                upvotes,
                downvotes,
                issue_title: issue.title.clone(),
            };

            if score > 0 {
                set.liked.push(entry);
            } else if score < 0 {
                set.disliked.push(entry);
            } else if upvotes > 0 || downvotes > 0 {
                set.neutral.push(entry);
            } else {
                set.dropped += 1;
            }
        }
    }

    // sort_by_key is stable, so ties keep input order.
    set.liked.sort_by_key(|e| std::cmp::Reverse(e.score));
    set.disliked.sort_by_key(|e| e.score);

    tracing::info!(
        liked = set.liked.len(),
        disliked = set.disliked.len(),
        neutral = set.neutral.len(),
        dropped = set.dropped,
        "analyzed reactions"
    );

    set
}

#[cfg(test)]
#[path = "reactions_test.rs"]
mod tests;
