//! Completion provider port for answer generation.

use async_trait::async_trait;

use crate::domain::errors::PipelineResult;

/// Trait for generative completion providers.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name (e.g., "workers-ai").
    fn name(&self) -> &'static str;

    /// Generate a completion for a prompt.
    ///
    /// The adapter normalizes heterogeneous response shapes into one
    /// answer string. Fails with `SynthesisFailed` only when the
    /// capability call itself errors; an empty answer is not an error.
    async fn complete(&self, prompt: &str) -> PipelineResult<String>;
}
