//! Embedding provider port.
//!
//! Converts text into dense vectors of a fixed dimension. The adapter
//! behind this trait owns all response-shape normalization; nothing else
//! in the system ever inspects raw embedding-capability output.

use async_trait::async_trait;

use crate::domain::errors::PipelineResult;

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Provider name (e.g., "workers-ai").
    fn name(&self) -> &'static str;

    /// Embedding dimension for this provider/model.
    fn dimension(&self) -> usize;

    /// Generate an embedding for a single text.
    ///
    /// Fails with `EmbeddingFailed` when the capability errors or returns
    /// an unrecognizable shape, and with `BadDimension` when the vector
    /// length does not match [`dimension`](Self::dimension); never
    /// silently truncated or padded.
    async fn embed(&self, text: &str) -> PipelineResult<Vec<f32>>;
}
