//! GitHub REST client used for publishing digests, harvesting reactions,
//! and listing releases and contributors.

pub mod client;
pub mod error;
pub mod tracker;
pub mod types;

pub use client::{GithubClient, DEFAULT_BASE_URL};
pub use error::GithubError;
pub use tracker::IssueTracker;
pub use types::{Issue, IssueComment, ReactionRollup, Release, RepoContributor};
