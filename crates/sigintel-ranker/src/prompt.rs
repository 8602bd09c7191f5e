//! Prompt construction and response parsing for the ranking call.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use sigintel_core::{Candidate, SelectedItem, Selection};

pub const FALLBACK_ANALYSIS: &str = "Ranking output could not be parsed. Fallback selection.";

static URL_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)URL:\**\s*(https?://\S+)").expect("valid url regex"));

static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\d+\.\s").expect("valid list item regex"));

/// Numbered candidate listing, one block per candidate:
///
/// ```text
/// 1. [HackerNews] Title (score: 42)
///    URL: https://example.com
/// ```
#[must_use]
pub fn format_candidates(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let score = match c.score {
                Some(s) if s != 0 => format!(" (score: {s})"),
                _ => String::new(),
            };
            format!("{}. [{}] {}{score}\n   URL: {}", i + 1, c.source, c.title, c.url)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[must_use]
pub fn build_prompt(candidates: &[Candidate], top_n: usize) -> String {
    format!(
        "Analyze these {count} signals and select the top {top_n} most interesting and relevant ones.

For each selected signal, provide:
1. The signal title and URL (preserve as given)
2. Why it matters
3. A suggested action (Read now, Create issue, Share with team, or Ignore)
4. Brief analysis (1-2 sentences)

Format your response as a numbered list where each item contains:
- URL: [the URL from the signal]
- Title: [the title]
- Why it matters: [reason]
- Action: [suggested action]
- Analysis: [your analysis]

Here are the signals:

{listing}",
        count = candidates.len(),
        listing = format_candidates(candidates),
    )
}

/// Map a ranking response back onto `candidates`.
///
/// The first `top_n` URLs found in `URL:` lines are matched against the input;
/// each match carries the text of the list item it appeared in as analysis.
/// Unknown URLs are ignored. If nothing matches, the first `top_n` candidates
/// are returned as [`Selection::Fallback`].
#[must_use]
pub fn parse_selection(
    response: &str,
    candidates: &[Candidate],
    top_n: usize,
) -> Vec<SelectedItem> {
    let starts: Vec<usize> = LIST_ITEM.find_iter(response).map(|m| m.start()).collect();

    let mut used: HashSet<usize> = HashSet::new();
    let mut selected = Vec::new();

    for caps in URL_LINE.captures_iter(response).take(top_n) {
        let Some(m) = caps.get(1) else { continue };
        let Some(index) = match_candidate(m.as_str(), candidates) else {
            tracing::debug!(url = m.as_str(), "ranked URL not among candidates");
            continue;
        };
        if !used.insert(index) {
            continue;
        }
        selected.push(SelectedItem {
            candidate: candidates[index].clone(),
            analysis: block_around(response, &starts, m.start()).to_string(),
            selection: Selection::Ranked,
        });
    }

    if selected.is_empty() {
        tracing::warn!(
            candidates = candidates.len(),
            top_n,
            "could not map ranking output to candidates; using fallback selection"
        );
        return fallback_selection(candidates, top_n);
    }

    selected
}

/// The first `top_n` candidates, flagged as fallback picks.
#[must_use]
pub fn fallback_selection(candidates: &[Candidate], top_n: usize) -> Vec<SelectedItem> {
    candidates
        .iter()
        .take(top_n)
        .map(|c| SelectedItem {
            candidate: c.clone(),
            analysis: FALLBACK_ANALYSIS.to_string(),
            selection: Selection::Fallback,
        })
        .collect()
}

/// The list item (delimited by `N. ` line starts) containing byte offset `pos`.
fn block_around<'a>(response: &'a str, starts: &[usize], pos: usize) -> &'a str {
    let begin = starts.iter().rev().find(|&&s| s <= pos).copied().unwrap_or(0);
    let end = starts
        .iter()
        .find(|&&s| s > pos)
        .copied()
        .unwrap_or(response.len());
    response[begin..end].trim()
}

/// Exact URL match first, then with markdown/punctuation residue trimmed.
fn match_candidate(url: &str, candidates: &[Candidate]) -> Option<usize> {
    candidates.iter().position(|c| c.url == url).or_else(|| {
        let trimmed = url.trim_end_matches(['*', ')', ']', '>', '.', ',', ';']);
        candidates.iter().position(|c| c.url == trimmed)
    })
}

#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;
