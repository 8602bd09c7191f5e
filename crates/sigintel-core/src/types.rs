use serde::{Deserialize, Serialize};

/// Where a candidate or stored signal came from.
///
/// Serialized as its display label so stored documents stay readable and
/// unknown labels written by other tooling survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Source {
    HackerNews,
    Reddit,
    GitHub,
    Other(String),
}

impl Source {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Source::HackerNews => "HackerNews",
            Source::Reddit => "Reddit",
            Source::GitHub => "GitHub",
            Source::Other(label) => label,
        }
    }
}

impl From<String> for Source {
    fn from(label: String) -> Self {
        match label.as_str() {
            "HackerNews" => Source::HackerNews,
            "Reddit" => Source::Reddit,
            "GitHub" => Source::GitHub,
            _ => Source::Other(label),
        }
    }
}

impl From<Source> for String {
    fn from(source: Source) -> Self {
        match source {
            Source::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A fetched item that has not yet been checked for freshness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub url: String,
    pub source: Source,
    /// Upvotes/points reported by the source, when it has any.
    pub score: Option<i64>,
}

/// How an item ended up in the ranked selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The ranking model chose the item.
    Ranked,
    /// The ranking output could not be mapped back to candidates, so the
    /// item was taken positionally from the input.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedItem {
    pub candidate: Candidate,
    /// Model commentary for the item (or a fixed note for fallbacks).
    pub analysis: String,
    pub selection: Selection,
}

impl SelectedItem {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.selection == Selection::Fallback
    }
}
