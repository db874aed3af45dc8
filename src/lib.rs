//! semnote library
//!
//! Local note keeping with embedding-based semantic ranking.
//!
//! # Modules
//!
//! - `core`: Note model, frontmatter, configuration, workspace paths
//! - `search`: Embedding providers and the semantic ranker
//! - `store`: SQLite note storage

pub mod core;
pub mod search;
pub mod store;

// Re-exports for convenience
pub use core::config::Config;
pub use core::note::{sort_notes, Note, NoteDraft, NotePatch, SortField, SortOrder};
pub use core::paths::WorkspacePaths;
pub use search::{
    BlankQuery, EmbedError, Embedder, HtpEmbedder, NoteText, RankError, Ranker, Ranking,
    SimilarityResult,
};
pub use store::{NoteFilter, NoteStore, StoreError};
