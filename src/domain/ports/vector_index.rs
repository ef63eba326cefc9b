//! Vector index port.
//!
//! Hides the single-vs-named-vector schema divergence from every other
//! component: callers obtain a [`VectorSchema`] once per request and pass
//! it back opaquely; only the adapter branches on it.

use async_trait::async_trait;

use crate::domain::errors::PipelineResult;
use crate::domain::models::{IndexStats, Point, QueryFilters, ScoredMatch, VectorSchema};

/// Trait for schema-adaptive vector index backends.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Resolve the collection's vector schema.
    ///
    /// Uses explicit configuration when present, otherwise probes the
    /// collection's declared configuration. A failed probe degrades
    /// optimistically to `Single` (with a warning) rather than failing
    /// ingestion over a metadata read; the write path surfaces the real
    /// error if the guess was wrong.
    async fn describe_schema(&self) -> VectorSchema;

    /// Write points to the collection, shaped for the given schema.
    ///
    /// Idempotent at the point-id level (same id overwrites). Fails with
    /// `StoreWriteFailed { status, body }` on a non-success backend
    /// response. Returns the number of points written.
    async fn upsert(&self, points: &[Point], schema: &VectorSchema) -> PipelineResult<usize>;

    /// Similarity search, descending score, at most `limit` results.
    ///
    /// Filters are a conjunction of equality/range predicates; the
    /// adapter translates them without altering semantics. For named
    /// schemas the selected vector name is attached to the request.
    async fn search(
        &self,
        vector: &[f32],
        filters: &QueryFilters,
        limit: usize,
        score_threshold: f32,
        schema: &VectorSchema,
    ) -> PipelineResult<Vec<ScoredMatch>>;

    /// Collection statistics (point count and declared schema).
    async fn stats(&self) -> PipelineResult<IndexStats>;
}
