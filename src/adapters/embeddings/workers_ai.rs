//! Cloudflare Workers AI embedding provider adapter.
//!
//! Calls the Workers AI REST `run` endpoint and normalizes the model's
//! heterogeneous response shapes into one flat `Vec<f32>` of the expected
//! dimension. The rest of the system never inspects raw model output.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::ports::EmbeddingProvider;

/// Configuration for the Workers AI embedding provider.
#[derive(Debug, Clone)]
pub struct WorkersAiEmbedderConfig {
    /// Cloudflare account id
    pub account_id: String,
    /// API token. Falls back to `CLOUDFLARE_API_TOKEN` env var.
    pub api_token: Option<String>,
    /// REST base URL. Default: `https://api.cloudflare.com/client/v4`.
    pub base_url: String,
    /// Embedding model. Default: `@cf/baai/bge-base-en-v1.5`.
    pub model: String,
    /// Expected embedding dimension. Default: 768.
    pub dimension: usize,
    /// Request timeout in seconds. Default: 60.
    pub timeout_secs: u64,
}

impl Default for WorkersAiEmbedderConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            api_token: None,
            base_url: "https://api.cloudflare.com/client/v4".to_string(),
            model: "@cf/baai/bge-base-en-v1.5".to_string(),
            dimension: 768,
            timeout_secs: 60,
        }
    }
}

impl WorkersAiEmbedderConfig {
    fn get_api_token(&self) -> PipelineResult<String> {
        self.api_token
            .clone()
            .or_else(|| std::env::var("CLOUDFLARE_API_TOKEN").ok())
            .ok_or_else(|| {
                PipelineError::Config(
                    "Workers AI token not set. Set CLOUDFLARE_API_TOKEN env var or configure api_token."
                        .to_string(),
                )
            })
    }
}

/// Workers AI embedding provider.
pub struct WorkersAiEmbedder {
    config: WorkersAiEmbedderConfig,
    client: reqwest::Client,
}

impl WorkersAiEmbedder {
    pub fn new(config: WorkersAiEmbedderConfig) -> PipelineResult<Self> {
        if config.account_id.trim().is_empty() {
            return Err(PipelineError::Config(
                "Workers AI account_id is not configured".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PipelineError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    fn run_url(&self) -> String {
        format!(
            "{}/accounts/{}/ai/run/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.account_id,
            self.config.model
        )
    }
}

#[async_trait]
impl EmbeddingProvider for WorkersAiEmbedder {
    fn name(&self) -> &'static str {
        "workers-ai"
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    async fn embed(&self, text: &str) -> PipelineResult<Vec<f32>> {
        let token = self.config.get_api_token()?;

        let response = self
            .client
            .post(self.run_url())
            .bearer_auth(token)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .map_err(|e| PipelineError::EmbeddingFailed(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(PipelineError::EmbeddingFailed(format!(
                "embedding API returned {status}: {body}"
            )));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| PipelineError::EmbeddingFailed(format!("invalid JSON response: {e}")))?;

        let vector =
            flatten_embedding(&value).map_err(PipelineError::EmbeddingFailed)?;

        if vector.len() != self.config.dimension {
            return Err(PipelineError::BadDimension {
                expected: self.config.dimension,
                actual: vector.len(),
            });
        }

        Ok(vector)
    }
}

/// Normalize an embedding response into a flat numeric vector.
///
/// Shapes are tried in a fixed order:
/// 1. a `result` envelope is unwrapped first (Cloudflare REST),
/// 2. `data[0].embedding` as a numeric array,
/// 3. `data[0]` as a numeric array (nested list-of-lists),
/// 4. `data` as a flat numeric array,
/// 5. the root value as a flat numeric array.
///
/// Element policy, applied uniformly: JSON `null` inside an otherwise
/// numeric vector (how non-finite floats surface in JSON) is zero-filled;
/// any other non-numeric element fails the whole call.
pub(crate) fn flatten_embedding(value: &Value) -> Result<Vec<f32>, String> {
    let value = value.get("result").filter(|r| !r.is_null()).unwrap_or(value);

    if let Some(data) = value.get("data") {
        if let Some(items) = data.as_array() {
            if let Some(first) = items.first() {
                if let Some(nested) = first.as_array() {
                    return numeric_vector(nested);
                }
                if let Some(embedding) = first.get("embedding").and_then(Value::as_array) {
                    return numeric_vector(embedding);
                }
            }
            return numeric_vector(items);
        }
    }

    if let Some(items) = value.as_array() {
        return numeric_vector(items);
    }

    Err("unrecognized embedding response shape".to_string())
}

fn numeric_vector(items: &[Value]) -> Result<Vec<f32>, String> {
    if items.is_empty() {
        return Err("empty embedding vector".to_string());
    }

    items
        .iter()
        .map(|item| match item {
            // Non-finite floats serialize as null; zero-fill rather than crash.
            Value::Null => Ok(0.0),
            other => other
                .as_f64()
                .map(|f| f as f32)
                .ok_or_else(|| format!("non-numeric embedding element: {other}")),
        })
        .collect()
}
