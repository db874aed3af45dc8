//! Semantic ranking of a note corpus against a free-text query
//!
//! One batched embedding call per query: `[query, note_1, ..., note_n]`.
//! Every vector is L2 normalized, each note is scored by its dot product with
//! the query, and the results are stable sorted by descending score.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::embedding::Embedder;
use super::error::{EmbedError, RankError};
use super::vector::{dot, normalize};

/// Anything that can be ranked: a title and a body.
///
/// Records with a missing field should return `""` for it.
pub trait NoteText {
    fn title(&self) -> &str;
    fn body(&self) -> &str;

    /// Text compared against the query: title, a space, then body
    fn comparison_text(&self) -> String {
        format!("{} {}", self.title(), self.body())
    }
}

/// A note paired with its similarity to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityResult<'a, T> {
    pub note: &'a T,
    pub score: f32,
}

/// Outcome of a ranking call
#[derive(Debug, Clone, PartialEq)]
pub enum Ranking<'a, T> {
    /// Descending by score, ties in input order
    Ranked(Vec<SimilarityResult<'a, T>>),
    /// The query was blank; notes in input order
    Unranked(Vec<&'a T>),
}

impl<'a, T> Ranking<'a, T> {
    pub fn len(&self) -> usize {
        match self {
            Self::Ranked(results) => results.len(),
            Self::Unranked(notes) => notes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Notes in result order, dropping scores
    pub fn notes(&self) -> Vec<&'a T> {
        match self {
            Self::Ranked(results) => results.iter().map(|r| r.note).collect(),
            Self::Unranked(notes) => notes.clone(),
        }
    }
}

/// What to do with a query that is empty after trimming
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlankQuery {
    /// Return the notes unranked
    #[default]
    Skip,
    /// Fail with [`RankError::InvalidQuery`]
    Reject,
}

/// Stateless ranker over an injected embedder
pub struct Ranker<E> {
    embedder: E,
    blank_query: BlankQuery,
}

impl<E: Embedder> Ranker<E> {
    pub fn new(embedder: E) -> Self {
        Self {
            embedder,
            blank_query: BlankQuery::default(),
        }
    }

    pub fn with_blank_query(mut self, policy: BlankQuery) -> Self {
        self.blank_query = policy;
        self
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Rank `notes` by semantic closeness to `query`
    pub fn rank<'a, T: NoteText>(
        &self,
        query: &str,
        notes: &'a [T],
    ) -> Result<Ranking<'a, T>, RankError> {
        if query.trim().is_empty() {
            return match self.blank_query {
                BlankQuery::Skip => {
                    tracing::debug!("blank query, returning notes unranked");
                    Ok(Ranking::Unranked(notes.iter().collect()))
                }
                BlankQuery::Reject => Err(RankError::InvalidQuery),
            };
        }

        if notes.is_empty() {
            return Ok(Ranking::Ranked(Vec::new()));
        }

        let texts: Vec<String> = notes.iter().map(|n| n.comparison_text()).collect();
        let mut batch: Vec<&str> = Vec::with_capacity(notes.len() + 1);
        batch.push(query);
        batch.extend(texts.iter().map(String::as_str));

        tracing::debug!(
            provider = self.embedder.name(),
            batch = batch.len(),
            "embedding query and notes"
        );
        let vectors = self.embedder.embed(&batch)?;
        check_shape(&vectors, batch.len())?;

        let query_vector = normalize(&vectors[0]);
        let mut results: Vec<SimilarityResult<'a, T>> = notes
            .iter()
            .zip(vectors[1..].iter())
            .map(|(note, vector)| SimilarityResult {
                note,
                score: dot(&query_vector, &normalize(vector)),
            })
            .collect();

        // Scores are finite, so partial_cmp never falls through; sort_by is stable.
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        Ok(Ranking::Ranked(results))
    }
}

/// The provider must return one vector per text, all of one dimension
fn check_shape(vectors: &[Vec<f32>], expected: usize) -> Result<(), EmbedError> {
    if vectors.len() != expected {
        return Err(EmbedError::Malformed(format!(
            "expected {} vectors, got {}",
            expected,
            vectors.len()
        )));
    }

    let dim = vectors[0].len();
    if let Some(pos) = vectors.iter().position(|v| v.len() != dim) {
        return Err(EmbedError::Malformed(format!(
            "vector {} has dimension {}, expected {}",
            pos,
            vectors[pos].len(),
            dim
        )));
    }

    Ok(())
}
