//! Markdown for published digests.
//!
//! Each selected item becomes its own comment so readers can react to it
//! individually. Comments open with `## Signal N: <title>`, the line the
//! feedback loop later reads titles back from.

use chrono::{DateTime, Utc};
use sigintel_core::SelectedItem;

#[must_use]
pub fn issue_title(now: DateTime<Utc>) -> String {
    format!("Signal Intel: {}", now.format("%Y-%m-%d"))
}

#[must_use]
pub fn issue_body(selected: &[SelectedItem], fresh_count: usize) -> String {
    let mut body = format!(
        "Top {} of {fresh_count} new signals. React with :+1: or :-1: on each comment to tune future picks.\n\n",
        selected.len()
    );
    for (i, item) in selected.iter().enumerate() {
        body.push_str(&format!(
            "{}. [{}] {}\n",
            i + 1,
            item.candidate.source,
            item.candidate.title
        ));
    }
    if selected.iter().any(SelectedItem::is_fallback) {
        body.push_str("\n_Ranking output could not be used; showing the first new signals instead._\n");
    }
    body
}

/// Comment body for the `position`-th (1-based) selected item.
#[must_use]
pub fn signal_comment(position: usize, item: &SelectedItem) -> String {
    let candidate = &item.candidate;
    let score = candidate
        .score
        .map(|s| format!(" (score: {s})"))
        .unwrap_or_default();
    format!(
        "## Signal {position}: {}\n\n**Source:** {}{score}\n**URL:** {}\n\n{}\n",
        candidate.title,
        candidate.source,
        candidate.url,
        item.analysis.trim()
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use sigintel_core::{Candidate, Selection, Source};

    use super::*;

    fn item(title: &str, selection: Selection) -> SelectedItem {
        SelectedItem {
            candidate: Candidate {
                title: title.to_string(),
                url: format!("https://example.com/{title}"),
                source: Source::HackerNews,
                score: Some(42),
            },
            analysis: "  Worth reading.\n".to_string(),
            selection,
        }
    }

    #[test]
    fn title_uses_utc_date() {
        let now = Utc.with_ymd_and_hms(2025, 3, 9, 23, 59, 0).unwrap();
        assert_eq!(issue_title(now), "Signal Intel: 2025-03-09");
    }

    #[test]
    fn comment_starts_with_signal_heading() {
        let comment = signal_comment(3, &item("Tokio 2.0", Selection::Ranked));
        assert!(comment.starts_with("## Signal 3: Tokio 2.0\n"));
        assert!(comment.contains("**Source:** HackerNews (score: 42)"));
        assert!(comment.contains("**URL:** https://example.com/Tokio 2.0"));
        assert!(comment.ends_with("Worth reading.\n"));
    }

    #[test]
    fn body_lists_items_and_flags_fallback() {
        let ranked = issue_body(&[item("a", Selection::Ranked)], 12);
        assert!(ranked.starts_with("Top 1 of 12 new signals."));
        assert!(ranked.contains("1. [HackerNews] a\n"));
        assert!(!ranked.contains("could not be used"));

        let fallback = issue_body(&[item("a", Selection::Fallback)], 1);
        assert!(fallback.contains("could not be used"));
    }
}
