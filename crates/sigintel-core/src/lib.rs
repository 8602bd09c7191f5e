//! Shared configuration, domain types, and collaborator traits for sigintel.

pub mod app_config;
pub mod collaborators;
pub mod config;
pub mod feedback;
pub mod persist;
pub mod sources;
pub mod types;

use thiserror::Error;

pub use app_config::{AppConfig, RepoRef};
pub use collaborators::{CommentRef, FeedbackSource, IssueRef, Publisher, Ranker};
pub use config::{load_app_config, load_app_config_from_env};
pub use feedback::{CommentFeedback, IssueFeedback, ReactionCounts, ReactionKind};
pub use sources::{load_sources, load_sources_or_default, parse_sources, SourcesConfig};
pub use types::{Candidate, SelectedItem, Selection, Source};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sources file {path}: {source}")]
    SourcesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid repository reference \"{0}\" (expected owner/repo)")]
    InvalidRepo(String),
}
