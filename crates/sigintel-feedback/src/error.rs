use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("failed to read policy document {path}: {source}")]
    PolicyRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("feedback source error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}
