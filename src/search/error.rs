use thiserror::Error;

/// Failure reported by an embedding provider
#[derive(Debug, Error)]
pub enum EmbedError {
    #[cfg(feature = "http")]
    #[error("embedding request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("embedding provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed embedding response: {0}")]
    Malformed(String),

    #[error("environment variable {0} holding the embedding API key is not set")]
    MissingApiKey(String),

    #[error("embedding provider `{0}` is not compiled in")]
    NotCompiled(&'static str),
}

/// Failure of a single ranking call; no partial ranking is ever returned
#[derive(Debug, Error)]
pub enum RankError {
    #[error("embedding unavailable: {0}")]
    EmbeddingUnavailable(#[source] EmbedError),

    #[error("query is blank")]
    InvalidQuery,
}

impl From<EmbedError> for RankError {
    fn from(err: EmbedError) -> Self {
        Self::EmbeddingUnavailable(err)
    }
}
