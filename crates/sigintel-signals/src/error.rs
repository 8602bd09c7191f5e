use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write signal store {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize signal store: {0}")]
    Serialize(#[from] serde_json::Error),
}
