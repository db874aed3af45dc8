//! Embedding providers
//!
//! The ranker only sees the [`Embedder`] trait. Two providers ship with the
//! crate:
//!
//! - [`HtpEmbedder`]: Harmonic Token Projection, a deterministic,
//!   training-free embedding that needs no model download
//!   (<https://arxiv.org/html/2511.20665>).
//! - `HttpEmbedder` (feature `http`): a client for hosted `/embeddings` APIs,
//!   see [`super::remote`].

use std::f64::consts::PI;

use super::error::EmbedError;

/// Dimension of [`HtpEmbedder`] vectors (a sin/cos pair per modulus)
pub const HTP_DIM: usize = 384;

const NUM_MODULI: usize = HTP_DIM / 2;

/// Tokens longer than this are truncated (Unicode code points)
const MAX_TOKEN_CHARS: usize = 64;

/// Turns an ordered batch of texts into an ordered batch of vectors
///
/// Implementations must return exactly one vector per input text, in input
/// order, all of the same dimension.
pub trait Embedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError>;

    /// Short provider name used in logs
    fn name(&self) -> &str {
        "custom"
    }
}

impl<E: Embedder + ?Sized> Embedder for &E {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        (**self).embed(texts)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<E: Embedder + ?Sized> Embedder for Box<E> {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        (**self).embed(texts)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Harmonic Token Projection embedder
#[derive(Debug, Clone)]
pub struct HtpEmbedder {
    moduli: Vec<u64>,
}

impl HtpEmbedder {
    pub fn new() -> Self {
        Self {
            moduli: first_primes(NUM_MODULI),
        }
    }

    /// Embed one text: mean of its token projections, L2 normalized.
    /// Text without tokens embeds to the zero vector.
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return vec![0.0; HTP_DIM];
        }

        let mut pooled = vec![0.0f64; HTP_DIM];
        for token in &tokens {
            self.accumulate_token(token, &mut pooled);
        }

        let count = tokens.len() as f64;
        for val in &mut pooled {
            *val /= count;
        }

        let norm = pooled.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            pooled.iter().map(|x| (x / norm) as f32).collect()
        } else {
            pooled.iter().map(|x| *x as f32).collect()
        }
    }

    /// Add the projection of `token` onto the unit circle of every modulus:
    /// `[sin(2πr/m), cos(2πr/m)]` with `r = N mod m`.
    fn accumulate_token(&self, token: &str, out: &mut [f64]) {
        let n = token_value(token);
        for (i, &m) in self.moduli.iter().enumerate() {
            let theta = 2.0 * PI * ((n % m) as f64) / (m as f64);
            out[2 * i] += theta.sin();
            out[2 * i + 1] += theta.cos();
        }
    }
}

impl Default for HtpEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl Embedder for HtpEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }

    fn name(&self) -> &str {
        "htp"
    }
}

/// Token as a base-2^16 integer over its code points (wrapping)
fn token_value(token: &str) -> u64 {
    token
        .chars()
        .take(MAX_TOKEN_CHARS)
        .fold(0u64, |n, c| n.wrapping_mul(65536).wrapping_add(c as u64))
}

/// Lowercased words split on whitespace and ASCII punctuation
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
        .collect()
}

/// First `count` primes; pairwise coprime moduli for the projection
fn first_primes(count: usize) -> Vec<u64> {
    let mut primes: Vec<u64> = Vec::with_capacity(count);
    let mut candidate = 2u64;
    while primes.len() < count {
        if primes
            .iter()
            .take_while(|&&p| p * p <= candidate)
            .all(|&p| candidate % p != 0)
        {
            primes.push(candidate);
        }
        candidate += 1;
    }
    primes
}
