//! Retrieval orchestration: query embedding, filtered search, ranking,
//! and bounded context assembly.

use std::sync::Arc;

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::{
    QueryFilters, RetrievalConfig, RetrievedContext, ScoredMatch, SourceRef,
};
use crate::domain::ports::{EmbeddingProvider, VectorIndex};

/// Separator placed between chunks in the assembled context.
pub const CONTEXT_SEPARATOR: &str = "\n---\n";

/// Sentinel used when no match survives thresholding.
///
/// Downstream prompting treats an empty context as a formatting bug, so
/// absence is spelled out instead.
pub const NO_CONTEXT_SENTINEL: &str = "(no context found)";

/// Query-side retrieval service.
pub struct RetrievalService {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    config: RetrievalConfig,
}

impl RetrievalService {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            embedder,
            index,
            config,
        }
    }

    /// Retrieve grounding context for a query.
    ///
    /// Embeds the query, searches with the configured limit/threshold,
    /// drops matches whose payload text is empty, and assembles the
    /// bounded context plus the citation list in descending-score order.
    pub async fn retrieve(
        &self,
        query: &str,
        filters: &QueryFilters,
    ) -> PipelineResult<RetrievedContext> {
        if query.trim().is_empty() {
            return Err(PipelineError::Validation("message is required".to_string()));
        }

        let vector = self.embedder.embed(query).await?;
        let schema = self.index.describe_schema().await;

        let mut matches = self
            .index
            .search(
                &vector,
                filters,
                self.config.limit,
                self.config.score_threshold,
                &schema,
            )
            .await?;

        matches.retain(|m| !m.payload.text.trim().is_empty());
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(self.config.limit);

        tracing::debug!(matches = matches.len(), "retrieval complete");

        Ok(assemble_context(&matches, self.config.max_context_chars))
    }
}

/// Assemble the bounded context string and citation list.
///
/// Chunks are joined in the given (descending-score) order. The context is
/// capped at `max_chars` characters by discarding whole trailing chunks
/// that would overflow, so the generator never sees a half-sentence; only
/// a first chunk that alone exceeds the cap is cut, so a non-empty match
/// set always yields non-empty context. Sources cover all surviving
/// matches, including any whose text the cap discarded.
pub(crate) fn assemble_context(matches: &[ScoredMatch], max_chars: usize) -> RetrievedContext {
    let sources: Vec<SourceRef> = matches
        .iter()
        .map(|m| SourceRef {
            title: m.payload.title.clone(),
            url: m.payload.url.clone().unwrap_or_default(),
            score: m.score,
        })
        .collect();

    if matches.is_empty() {
        return RetrievedContext {
            context_text: NO_CONTEXT_SENTINEL.to_string(),
            sources,
        };
    }

    let separator_chars = CONTEXT_SEPARATOR.chars().count();
    let mut context = String::new();
    let mut used_chars = 0usize;

    for (i, m) in matches.iter().enumerate() {
        let text = m.payload.text.as_str();
        let text_chars = text.chars().count();

        if i == 0 {
            if text_chars > max_chars {
                context.extend(text.chars().take(max_chars));
                break;
            }
            context.push_str(text);
            used_chars = text_chars;
        } else {
            if used_chars + separator_chars + text_chars > max_chars {
                break;
            }
            context.push_str(CONTEXT_SEPARATOR);
            context.push_str(text);
            used_chars += separator_chars + text_chars;
        }
    }

    RetrievedContext {
        context_text: context,
        sources,
    }
}
