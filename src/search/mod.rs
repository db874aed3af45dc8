//! Semantic search over notes
//!
//! The ranker is independent of where embeddings come from; providers are
//! chosen from configuration by [`embedder_from_config`].

pub mod embedding;
pub mod error;
pub mod ranker;
#[cfg(feature = "http")]
pub mod remote;
pub mod vector;

pub use embedding::{Embedder, HtpEmbedder};
pub use error::{EmbedError, RankError};
pub use ranker::{BlankQuery, NoteText, Ranker, Ranking, SimilarityResult};

use crate::core::config::{EmbeddingConfig, Provider};

/// Build the embedder named by the configuration
pub fn embedder_from_config(cfg: &EmbeddingConfig) -> Result<Box<dyn Embedder>, EmbedError> {
    match cfg.provider {
        Provider::Htp => Ok(Box::new(HtpEmbedder::new())),
        #[cfg(feature = "http")]
        Provider::Http => Ok(Box::new(remote::HttpEmbedder::from_config(cfg)?)),
        #[cfg(not(feature = "http"))]
        Provider::Http => Err(EmbedError::NotCompiled("http")),
    }
}
