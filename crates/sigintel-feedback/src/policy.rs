//! Compiles a [`PreferenceSet`] into the policy text fed to the next ranking
//! call, and merges it into the persisted policy document.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use sigintel_core::persist::{read_optional, write_atomic};

use crate::error::FeedbackError;
use crate::reactions::PreferenceSet;

pub const DEFAULT_MARKER: &str = "## RLHF Learned Preferences";

const TITLE_LIMIT: usize = 100;

static SIGNAL_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"## Signal \d+: (.+)").expect("valid signal heading regex"));

/// Render the preference section of the policy document.
///
/// At most `top_n` entries are listed per direction; a direction with no
/// entries gets no section at all.
#[must_use]
pub fn render_policy(preferences: &PreferenceSet, top_n: usize) -> String {
    let mut text = String::from("Based on your feedback from recent signals:\n\n");

    if !preferences.liked.is_empty() {
        text.push_str("### Signals You Found Valuable\n\n");
        text.push_str("You reacted positively to these types of signals:\n\n");
        for (i, entry) in preferences.liked.iter().take(top_n).enumerate() {
            text.push_str(&format!(
                "{}. [+{}] {}\n",
                i + 1,
                entry.score,
                extract_title(&entry.content)
            ));
        }
        text.push('\n');
    }

    if !preferences.disliked.is_empty() {
        text.push_str("### Signals You Found Less Valuable\n\n");
        text.push_str("You reacted negatively to these types of signals:\n\n");
        for (i, entry) in preferences.disliked.iter().take(top_n).enumerate() {
            text.push_str(&format!(
                "{}. [{}] {}\n",
                i + 1,
                entry.score,
                extract_title(&entry.content)
            ));
        }
        text.push('\n');
    }

    text.push_str(
        "When selecting signals, prioritize content similar to the valued signals \
         and avoid content similar to the low-value signals.\n",
    );
    text
}

/// Best-effort title for a published comment body.
///
/// Prefers the `## Signal N: <title>` heading, then the first non-blank line,
/// then the raw content. The latter two are cut to 100 characters.
#[must_use]
pub fn extract_title(content: &str) -> String {
    if let Some(caps) = SIGNAL_HEADING.captures(content) {
        return caps[1].trim().to_string();
    }

    if let Some(line) = content.lines().find(|l| !l.trim().is_empty()) {
        return line.trim().chars().take(TITLE_LIMIT).collect();
    }

    content.chars().take(TITLE_LIMIT).collect()
}

/// Replace everything from the first `marker` onward with the new section, or
/// append the section when the marker is absent.
///
/// A blank marker delimits nothing, so `existing` is returned unchanged.
#[must_use]
pub fn merge_policy(existing: &str, policy_text: &str, marker: &str) -> String {
    if marker.trim().is_empty() {
        tracing::warn!("blank policy marker; policy document left unchanged");
        return existing.to_string();
    }
    match existing.find(marker) {
        Some(idx) => format!("{}{marker}\n\n{policy_text}", &existing[..idx]),
        None => format!("{existing}\n\n{marker}\n\n{policy_text}"),
    }
}

/// The persisted prompt text handed to the ranker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyDocument {
    text: String,
}

impl PolicyDocument {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Load the document at `path`. A missing file is an empty document.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackError::PolicyRead`] for any other read failure.
    pub fn load(path: &Path) -> Result<Self, FeedbackError> {
        match read_optional(path) {
            Ok(Some(text)) => Ok(Self { text }),
            Ok(None) => {
                tracing::info!(path = %path.display(), "no policy document yet");
                Ok(Self::default())
            }
            Err(source) => Err(FeedbackError::PolicyRead {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// # Errors
    ///
    /// Returns [`FeedbackError::Write`] if the atomic write fails.
    pub fn save(&self, path: &Path) -> Result<(), FeedbackError> {
        write_atomic(path, &self.text).map_err(|source| FeedbackError::Write {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!(path = %path.display(), "saved policy document");
        Ok(())
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// A copy with the marked section replaced by `policy_text`.
    #[must_use]
    pub fn merged(&self, policy_text: &str, marker: &str) -> Self {
        Self {
            text: merge_policy(&self.text, policy_text, marker),
        }
    }
}
