//! Document ingestion service.
//!
//! Orchestrates chunking, per-chunk embedding, and the schema-adaptive
//! index write. Chunks are embedded sequentially so ordinals and source
//! offsets stay traceable in the final point batch.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::{DocumentInput, IngestReceipt, Point, PointPayload};
use crate::domain::ports::{EmbeddingProvider, VectorIndex};
use crate::services::chunker::Chunker;

/// Ingestion pipeline: document in, points in the index out.
pub struct IngestionService {
    chunker: Chunker,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
}

impl IngestionService {
    pub fn new(
        chunker: Chunker,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            chunker,
            embedder,
            index,
        }
    }

    /// Ingest one document.
    ///
    /// Validates before any network call fires, then embeds each chunk in
    /// input order, resolves the collection schema once, and writes the
    /// whole batch. A failure at any stage surfaces as that stage's error;
    /// partial progress is never reported as success.
    pub async fn ingest(&self, doc: &DocumentInput) -> PipelineResult<IngestReceipt> {
        if doc.text.trim().is_empty() {
            return Err(PipelineError::Validation("text is required".to_string()));
        }

        let title = doc.effective_title();
        let url = doc.effective_url();
        let tags = doc.normalized_tags();

        let chunks = self.chunker.chunk(&doc.text);
        if chunks.is_empty() {
            return Err(PipelineError::Validation(
                "document produced no chunks".to_string(),
            ));
        }

        tracing::info!(
            title = %title,
            chunks = chunks.len(),
            "chunked document"
        );

        // One timestamp per document, shared by all of its points.
        let now = Utc::now();
        let created_at = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let created_at_ts = now.timestamp_millis();

        let mut points = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let vector = self.embedder.embed(&chunk.text).await?;
            points.push(Point {
                id: Uuid::new_v4().to_string(),
                vector,
                payload: PointPayload {
                    title: title.clone(),
                    url: url.clone(),
                    tags: tags.clone(),
                    text: chunk.text.clone(),
                    created_at: created_at.clone(),
                    created_at_ts,
                },
            });
        }

        let schema = self.index.describe_schema().await;
        let inserted = self.index.upsert(&points, &schema).await?;

        tracing::info!(
            title = %title,
            inserted,
            mode = schema.mode(),
            "ingested document"
        );

        Ok(IngestReceipt {
            inserted,
            mode: schema.mode().to_string(),
            vector_name: schema.vector_name().map(ToString::to_string),
        })
    }
}
