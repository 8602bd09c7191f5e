use sigintel_github::GithubError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{context} returned status {status}")]
    Status { context: String, status: u16 },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Github(#[from] GithubError),

    #[error("invalid repository reference \"{0}\"")]
    InvalidRepo(String),
}
