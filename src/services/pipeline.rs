//! Pipeline facade wiring ingestion, retrieval, and answer synthesis.
//!
//! This is the single entry point the HTTP server and the CLI share. One
//! logical request is a sequential chain of awaits (embed, probe, search,
//! complete) with no automatic retries; each stage either completes or
//! fails with its own tagged error.

use std::sync::Arc;

use crate::domain::errors::PipelineResult;
use crate::domain::models::{
    ChatOutcome, DocumentInput, IndexStats, IngestReceipt, QueryFilters, RetrievalConfig,
};
use crate::domain::ports::{CompletionProvider, EmbeddingProvider, VectorIndex};
use crate::services::answer::AnswerService;
use crate::services::chunker::Chunker;
use crate::services::ingestion::IngestionService;
use crate::services::retrieval::RetrievalService;

/// End-to-end question-answering pipeline.
pub struct Pipeline {
    ingestion: IngestionService,
    retrieval: RetrievalService,
    answer: AnswerService,
    index: Arc<dyn VectorIndex>,
}

impl Pipeline {
    pub fn new(
        chunker: Chunker,
        embedder: Arc<dyn EmbeddingProvider>,
        completer: Arc<dyn CompletionProvider>,
        index: Arc<dyn VectorIndex>,
        retrieval_config: RetrievalConfig,
    ) -> Self {
        Self {
            ingestion: IngestionService::new(chunker, Arc::clone(&embedder), Arc::clone(&index)),
            retrieval: RetrievalService::new(embedder, Arc::clone(&index), retrieval_config),
            answer: AnswerService::new(completer),
            index,
        }
    }

    /// Ingest a document: chunk, embed, upsert.
    pub async fn ingest(&self, doc: &DocumentInput) -> PipelineResult<IngestReceipt> {
        self.ingestion.ingest(doc).await
    }

    /// Answer a question grounded in retrieved context.
    pub async fn ask(&self, message: &str, filters: &QueryFilters) -> PipelineResult<ChatOutcome> {
        let retrieved = self.retrieval.retrieve(message, filters).await?;
        let answer = self
            .answer
            .synthesize(message, &retrieved.context_text)
            .await?;

        Ok(ChatOutcome {
            answer,
            sources: retrieved.sources,
        })
    }

    /// Collection statistics from the index.
    pub async fn stats(&self) -> PipelineResult<IndexStats> {
        self.index.stats().await
    }

    /// Direct access to the index, for maintenance commands.
    pub fn index(&self) -> &Arc<dyn VectorIndex> {
        &self.index
    }
}
