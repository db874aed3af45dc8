//! Client for hosted embedding APIs
//!
//! Speaks the common `/embeddings` JSON shape:
//! request `{"model", "input": [...], "dimensions"?}`,
//! response `{"data": [{"index"?, "embedding": [...]}]}`.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;

use super::embedding::Embedder;
use super::error::EmbedError;
use crate::core::config::EmbeddingConfig;

pub struct HttpEmbedder {
    client: Client,
    url: String,
    model: String,
    api_key_env: Option<String>,
    dimensions: Option<usize>,
}

impl HttpEmbedder {
    pub fn from_config(cfg: &EmbeddingConfig) -> Result<Self, EmbedError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            url: format!("{}{}", cfg.api_base.trim_end_matches('/'), cfg.path),
            model: cfg.model.clone(),
            api_key_env: cfg.api_key_env.clone(),
            dimensions: cfg.dimensions,
        })
    }

    fn api_key(&self) -> Result<Option<String>, EmbedError> {
        match &self.api_key_env {
            Some(var) => std::env::var(var)
                .map(Some)
                .map_err(|_| EmbedError::MissingApiKey(var.clone())),
            None => Ok(None),
        }
    }
}

impl Embedder for HttpEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        let mut body = serde_json::json!({
            "model": self.model,
            "input": texts,
        });
        if let Some(dimensions) = self.dimensions {
            body["dimensions"] = dimensions.into();
        }

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(key) = self.api_key()? {
            request = request.bearer_auth(key);
        }

        tracing::debug!(url = %self.url, batch = texts.len(), "requesting embeddings");
        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(EmbedError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = response.json()?;
        parse_embedding_response(json)
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Extract vectors from a response body, ordered by `data[].index`
fn parse_embedding_response(json: Value) -> Result<Vec<Vec<f32>>, EmbedError> {
    let data = json
        .get("data")
        .and_then(|v| v.as_array())
        .ok_or_else(|| EmbedError::Malformed("missing data array".to_string()))?;

    let mut indexed: Vec<(usize, Vec<f32>)> = Vec::with_capacity(data.len());
    for (position, item) in data.iter().enumerate() {
        let index = item
            .get("index")
            .and_then(|v| v.as_u64())
            .map(|v| v as usize)
            .unwrap_or(position);
        let values = item
            .get("embedding")
            .and_then(|v| v.as_array())
            .ok_or_else(|| EmbedError::Malformed(format!("item {} has no embedding", position)))?;

        let vector = values
            .iter()
            .map(|v| v.as_f64().map(|x| x as f32))
            .collect::<Option<Vec<f32>>>()
            .ok_or_else(|| EmbedError::Malformed(format!("item {} has a non-numeric value", position)))?;
        indexed.push((index, vector));
    }

    // Indices must be exactly 0..len, each once
    let mut seen = vec![false; data.len()];
    for (index, _) in &indexed {
        match seen.get_mut(*index) {
            Some(slot) if !*slot => *slot = true,
            Some(_) => {
                return Err(EmbedError::Malformed(format!("duplicate index {}", index)));
            }
            None => {
                return Err(EmbedError::Malformed(format!(
                    "index {} out of range for {} items",
                    index,
                    data.len()
                )));
            }
        }
    }

    indexed.sort_by_key(|(index, _)| *index);

    Ok(indexed.into_iter().map(|(_, v)| v).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_orders_by_index() {
        let json = serde_json::json!({
            "data": [
                { "index": 1, "embedding": [2.0, 3.0] },
                { "index": 0, "embedding": [0.5, 1.5] }
            ]
        });
        let parsed = parse_embedding_response(json).unwrap();
        assert_eq!(parsed, vec![vec![0.5, 1.5], vec![2.0, 3.0]]);
    }

    #[test]
    fn test_parse_without_index_keeps_position() {
        let json = serde_json::json!({
            "data": [{ "embedding": [1.0] }, { "embedding": [2.0] }]
        });
        let parsed = parse_embedding_response(json).unwrap();
        assert_eq!(parsed, vec![vec![1.0], vec![2.0]]);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let missing = parse_embedding_response(serde_json::json!({ "results": [] }));
        assert!(matches!(missing, Err(EmbedError::Malformed(_))));

        let non_numeric = parse_embedding_response(serde_json::json!({
            "data": [{ "embedding": [1.0, "x"] }]
        }));
        assert!(matches!(non_numeric, Err(EmbedError::Malformed(_))));
    }

    #[test]
    fn test_parse_rejects_duplicate_index() {
        let parsed = parse_embedding_response(serde_json::json!({
            "data": [
                { "index": 0, "embedding": [1.0, 0.0] },
                { "index": 0, "embedding": [0.0, 1.0] }
            ]
        }));
        assert!(matches!(parsed, Err(EmbedError::Malformed(_))));
    }

    #[test]
    fn test_parse_rejects_out_of_range_index() {
        let parsed = parse_embedding_response(serde_json::json!({
            "data": [
                { "index": 0, "embedding": [1.0, 0.0] },
                { "index": 1, "embedding": [0.0, 1.0] },
                { "index": 7, "embedding": [1.0, 0.0] }
            ]
        }));
        assert!(matches!(parsed, Err(EmbedError::Malformed(_))));
    }

    #[test]
    fn test_missing_api_key() {
        let cfg = EmbeddingConfig {
            api_key_env: Some("SEMNOTE_TEST_KEY_THAT_IS_NEVER_SET".to_string()),
            ..EmbeddingConfig::default()
        };
        let embedder = HttpEmbedder::from_config(&cfg).unwrap();
        assert!(matches!(embedder.api_key(), Err(EmbedError::MissingApiKey(_))));
    }
}
