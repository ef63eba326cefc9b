//! Cloudflare Workers AI completion provider adapter.
//!
//! Invokes the generative model and extracts the answer text from its
//! response through a fixed-priority field chain, mirroring the embedding
//! adapter's normalization boundary.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::ports::CompletionProvider;

/// Placeholder returned when no known answer field is present.
///
/// A malformed-but-successful completion is delivered as this documented
/// default instead of failing the whole request.
pub const FALLBACK_ANSWER: &str = "No answer was produced.";

/// Configuration for the Workers AI completion provider.
#[derive(Debug, Clone)]
pub struct WorkersAiCompleterConfig {
    /// Cloudflare account id
    pub account_id: String,
    /// API token. Falls back to `CLOUDFLARE_API_TOKEN` env var.
    pub api_token: Option<String>,
    /// REST base URL. Default: `https://api.cloudflare.com/client/v4`.
    pub base_url: String,
    /// Completion model. Default: `@cf/meta/llama-3.1-8b-instruct`.
    pub model: String,
    /// Request timeout in seconds. Default: 60.
    pub timeout_secs: u64,
}

impl Default for WorkersAiCompleterConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            api_token: None,
            base_url: "https://api.cloudflare.com/client/v4".to_string(),
            model: "@cf/meta/llama-3.1-8b-instruct".to_string(),
            timeout_secs: 60,
        }
    }
}

impl WorkersAiCompleterConfig {
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

/// Workers AI completion provider.
pub struct WorkersAiCompleter {
    config: WorkersAiCompleterConfig,
    client: reqwest::Client,
}

impl WorkersAiCompleter {
    pub fn new(config: WorkersAiCompleterConfig) -> PipelineResult<Self> {
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
impl CompletionProvider for WorkersAiCompleter {
    fn name(&self) -> &'static str {
        "workers-ai"
    }

    async fn complete(&self, prompt: &str) -> PipelineResult<String> {
        let token = self.config.get_api_token()?;

        let response = self
            .client
            .post(self.run_url())
            .bearer_auth(token)
            .json(&serde_json::json!({ "prompt": prompt }))
            .send()
            .await
            .map_err(|e| PipelineError::SynthesisFailed(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(PipelineError::SynthesisFailed(format!(
                "completion API returned {status}: {body}"
            )));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| PipelineError::SynthesisFailed(format!("invalid JSON response: {e}")))?;

        Ok(extract_answer(&value))
    }
}

/// Extract the answer text from a completion response.
///
/// Field names are resolved in a fixed priority order after unwrapping a
/// `result` envelope: `response`, then a `result` string, then a bare
/// string root. When nothing matches, the documented [`FALLBACK_ANSWER`]
/// placeholder is returned; a shape surprise is not a request failure.
pub(crate) fn extract_answer(value: &Value) -> String {
    let value = value.get("result").filter(|r| !r.is_null()).unwrap_or(value);

    if let Some(answer) = value.get("response").and_then(Value::as_str) {
        return answer.to_string();
    }
    if let Some(answer) = value.get("result").and_then(Value::as_str) {
        return answer.to_string();
    }
    if let Some(answer) = value.as_str() {
        return answer.to_string();
    }

    FALLBACK_ANSWER.to_string()
}
