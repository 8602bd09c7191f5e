//! Contributor discovery and scoring across watched repositories.

pub mod discovery;
pub mod scoring;

pub use discovery::{discover_contributors, CONTRIBUTORS_PER_REPO};
pub use scoring::{
    format_candidates_markdown, rank_contributors, score_contributor, Contributor,
    ScoredContributor, REPORT_LIMIT,
};
