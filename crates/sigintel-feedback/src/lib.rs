//! Reaction feedback loop: reduce reactions on published signals into
//! preferences, then compile them into the ranking policy document.

pub mod error;
pub mod pipeline;
pub mod policy;
pub mod reactions;

pub use error::FeedbackError;
pub use pipeline::{harvest_preferences, updated_policy, FeedbackConfig, Harvest};
pub use policy::{extract_title, merge_policy, render_policy, PolicyDocument, DEFAULT_MARKER};
pub use reactions::{analyze_reactions, PreferenceSet, ReactionEntry, SUMMARY_LIMIT};
