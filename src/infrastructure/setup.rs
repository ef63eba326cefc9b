//! Wiring: build the pipeline from configuration.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::completions::{WorkersAiCompleter, WorkersAiCompleterConfig};
use crate::adapters::embeddings::{WorkersAiEmbedder, WorkersAiEmbedderConfig};
use crate::adapters::qdrant::QdrantIndex;
use crate::domain::models::Config;
use crate::services::{Chunker, Pipeline};

/// Construct the full pipeline from loaded configuration.
pub fn build_pipeline(config: &Config) -> Result<Arc<Pipeline>> {
    let chunker =
        Chunker::with_config(config.chunking.clone()).context("invalid chunking configuration")?;

    let embedder = WorkersAiEmbedder::new(WorkersAiEmbedderConfig {
        account_id: config.workers_ai.account_id.clone(),
        api_token: config.workers_ai.api_token.clone(),
        base_url: config.workers_ai.base_url.clone(),
        model: config.workers_ai.embedding_model.clone(),
        dimension: config.workers_ai.embedding_dimension,
        timeout_secs: config.workers_ai.timeout_secs,
    })
    .context("failed to build embedding provider")?;

    let completer = WorkersAiCompleter::new(WorkersAiCompleterConfig {
        account_id: config.workers_ai.account_id.clone(),
        api_token: config.workers_ai.api_token.clone(),
        base_url: config.workers_ai.base_url.clone(),
        model: config.workers_ai.completion_model.clone(),
        timeout_secs: config.workers_ai.timeout_secs,
    })
    .context("failed to build completion provider")?;

    let index = QdrantIndex::new(config.index.clone()).context("failed to build vector index")?;

    Ok(Arc::new(Pipeline::new(
        chunker,
        Arc::new(embedder),
        Arc::new(completer),
        Arc::new(index),
        config.retrieval.clone(),
    )))
}
