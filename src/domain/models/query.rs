//! Query-side domain models: filters, retrieved context, answers.

use serde::{Deserialize, Serialize};

/// Logical search predicates, ANDed together by the index adapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryFilters {
    /// Match points carrying any of these tags
    pub tags: Vec<String>,

    /// Match points created at or after this epoch-millisecond timestamp
    pub since_ts: Option<i64>,
}

impl QueryFilters {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.since_ts.is_none()
    }
}

/// A citation entry for one retrieved chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,
    pub url: String,
    pub score: f32,
}

/// The evidence assembled for one query: bounded context text plus the
/// citation list in the same descending-score order.
///
/// Constructed fresh per query and discarded once the answer is
/// synthesized; never persisted.
#[derive(Debug, Clone)]
pub struct RetrievedContext {
    pub context_text: String,
    pub sources: Vec<SourceRef>,
}

/// Final outcome of a chat query.
#[derive(Debug, Clone, Serialize)]
pub struct ChatOutcome {
    pub answer: String,
    pub sources: Vec<SourceRef>,
}
