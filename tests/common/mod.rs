//! Shared in-process test doubles for the pipeline ports.
//!
//! The stub embedder produces deterministic byte-histogram vectors, so
//! texts sharing vocabulary land close in cosine space and round-trip
//! retrieval tests behave like a real index without any network.

// Not every test target uses every helper.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use grimoire::domain::errors::{PipelineError, PipelineResult};
use grimoire::domain::models::{
    IndexStats, Point, QueryFilters, ScoredMatch, VectorSchema,
};
use grimoire::domain::ports::{CompletionProvider, EmbeddingProvider, VectorIndex};

/// Deterministic embedding: normalized byte histogram.
pub fn histogram_vector(text: &str, dimension: usize) -> Vec<f32> {
    let mut v = vec![0.0f32; dimension];
    for b in text.bytes() {
        v[b as usize % dimension] += 1.0;
    }
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-6);
    v.iter().map(|x| x / norm).collect()
}

pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Counting stub embedder.
pub struct StubEmbedder {
    dimension: usize,
    calls: AtomicUsize,
}

impl StubEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for StubEmbedder {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> PipelineResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(histogram_vector(text, self.dimension))
    }
}

/// In-memory vector index ranking by cosine similarity.
#[derive(Default)]
pub struct InMemoryIndex {
    pub points: Mutex<Vec<Point>>,
    /// Simulate a write failure with this status/body.
    pub fail_upsert: Option<(u16, String)>,
    upsert_calls: AtomicUsize,
    search_calls: AtomicUsize,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_writes(status: u16, body: &str) -> Self {
        Self {
            fail_upsert: Some((status, body.to_string())),
            ..Self::default()
        }
    }

    pub fn upsert_count(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }

    pub fn search_count(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VectorIndex for InMemoryIndex {
    async fn describe_schema(&self) -> VectorSchema {
        VectorSchema::Single
    }

    async fn upsert(&self, points: &[Point], _schema: &VectorSchema) -> PipelineResult<usize> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);

        if let Some((status, body)) = &self.fail_upsert {
            return Err(PipelineError::StoreWriteFailed {
                status: *status,
                body: body.clone(),
            });
        }

        let mut stored = self.points.lock().unwrap();
        for point in points {
            stored.retain(|p| p.id != point.id);
            stored.push(point.clone());
        }
        Ok(points.len())
    }

    async fn search(
        &self,
        vector: &[f32],
        filters: &QueryFilters,
        limit: usize,
        score_threshold: f32,
        _schema: &VectorSchema,
    ) -> PipelineResult<Vec<ScoredMatch>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);

        let stored = self.points.lock().unwrap();
        let mut matches: Vec<ScoredMatch> = stored
            .iter()
            .filter(|p| {
                if !filters.tags.is_empty()
                    && !p.payload.tags.iter().any(|t| filters.tags.contains(t))
                {
                    return false;
                }
                if let Some(gte) = filters.since_ts {
                    if p.payload.created_at_ts < gte {
                        return false;
                    }
                }
                true
            })
            .map(|p| ScoredMatch {
                id: p.id.clone(),
                score: cosine(vector, &p.vector),
                payload: p.payload.clone(),
            })
            .filter(|m| m.score >= score_threshold)
            .collect();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(limit);
        Ok(matches)
    }

    async fn stats(&self) -> PipelineResult<IndexStats> {
        Ok(IndexStats {
            points_count: self.points.lock().unwrap().len() as u64,
            mode: "single".to_string(),
            vector_name: None,
        })
    }
}

/// Canned completion provider recording every prompt it sees.
pub struct CannedCompleter {
    pub answer: String,
    pub prompts: Mutex<Vec<String>>,
    pub fail: bool,
}

impl CannedCompleter {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            prompts: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: String::new(),
            prompts: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionProvider for CannedCompleter {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn complete(&self, prompt: &str) -> PipelineResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            return Err(PipelineError::SynthesisFailed(
                "canned failure".to_string(),
            ));
        }
        Ok(self.answer.clone())
    }
}
