//! Qdrant vector index adapter.
//!
//! The only component allowed to see the single-vs-named-vector schema
//! divergence. Resolves the collection schema (configured or probed),
//! shapes writes and searches accordingly, and translates backend match
//! records into logical ranked results.

pub mod wire;

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::{
    IndexConfig, IndexStats, Point, QueryFilters, ScoredMatch, VectorSchema,
};
use crate::domain::ports::VectorIndex;

/// Vector name assumed when named mode is forced without a pinned name.
const DEFAULT_VECTOR_NAME: &str = "text";

/// Qdrant REST client implementing [`VectorIndex`].
pub struct QdrantIndex {
    config: IndexConfig,
    client: reqwest::Client,
}

impl QdrantIndex {
    pub fn new(config: IndexConfig) -> PipelineResult<Self> {
        let base = config.url.trim_end_matches('/');
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(PipelineError::Config(format!(
                "index.url must be an http(s) URL, got {:?}",
                config.url
            )));
        }

        if let Some(mode) = config.vector_mode.as_deref() {
            if mode != "single" && mode != "named" {
                return Err(PipelineError::Config(format!(
                    "index.vector_mode must be \"single\" or \"named\", got {mode:?}"
                )));
            }
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PipelineError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    fn collection_url(&self) -> String {
        format!(
            "{}/collections/{}",
            self.config.url.trim_end_matches('/'),
            self.config.collection
        )
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        let mut builder = self.client.request(method, url);
        if let Some(key) = self
            .config
            .api_key
            .clone()
            .or_else(|| std::env::var("QDRANT_API_KEY").ok())
        {
            builder = builder.header("api-key", key);
        }
        builder
    }

    /// Schema forced by configuration, when present.
    fn forced_schema(&self) -> Option<VectorSchema> {
        match self.config.vector_mode.as_deref() {
            Some("single") => Some(VectorSchema::Single),
            Some("named") => {
                let name = self
                    .config
                    .vector_name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_VECTOR_NAME.to_string());
                Some(VectorSchema::Named {
                    names: vec![name.clone()],
                    selected: name,
                })
            }
            _ => None,
        }
    }

    /// Read the collection's declared configuration.
    async fn fetch_collection_info(&self) -> PipelineResult<Value> {
        let response = self
            .request(reqwest::Method::GET, self.collection_url())
            .send()
            .await
            .map_err(|e| PipelineError::StoreReadFailed(format!("collection probe failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(PipelineError::StoreReadFailed(format!(
                "collection probe returned {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| PipelineError::StoreReadFailed(format!("invalid collection info: {e}")))
    }
}

#[async_trait]
impl VectorIndex for QdrantIndex {
    async fn describe_schema(&self) -> VectorSchema {
        if let Some(schema) = self.forced_schema() {
            return schema;
        }

        match self.fetch_collection_info().await {
            Ok(info) => {
                schema_from_collection_info(&info, self.config.vector_name.as_deref())
                    .unwrap_or(VectorSchema::Single)
            }
            Err(err) => {
                // Optimistic degrade: a failed metadata probe must not hard-fail
                // ingestion; a wrong guess surfaces as a structured write error.
                tracing::warn!(error = %err, "schema probe failed, assuming single-vector");
                VectorSchema::Single
            }
        }
    }

    async fn upsert(&self, points: &[Point], schema: &VectorSchema) -> PipelineResult<usize> {
        let wire_points: Vec<_> = points.iter().map(|p| wire::to_wire(p, schema)).collect();

        let response = self
            .request(
                reqwest::Method::PUT,
                format!("{}/points?wait=true", self.collection_url()),
            )
            .json(&serde_json::json!({ "points": wire_points }))
            .send()
            .await
            .map_err(|e| PipelineError::StoreWriteFailed {
                status: 0,
                body: format!("upsert request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::StoreWriteFailed {
                status: status.as_u16(),
                body,
            });
        }

        Ok(points.len())
    }

    async fn search(
        &self,
        vector: &[f32],
        filters: &QueryFilters,
        limit: usize,
        score_threshold: f32,
        schema: &VectorSchema,
    ) -> PipelineResult<Vec<ScoredMatch>> {
        let mut body = serde_json::json!({
            "vector": wire::query_vector(vector, schema),
            "limit": limit,
            "with_payload": true,
            "score_threshold": score_threshold,
        });
        if let Some(filter) = wire::to_filter(filters) {
            body["filter"] = filter;
        }

        let response = self
            .request(
                reqwest::Method::POST,
                format!("{}/points/search", self.collection_url()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::StoreReadFailed(format!("search request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::StoreReadFailed(format!(
                "search returned {status}: {body}"
            )));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| PipelineError::StoreReadFailed(format!("invalid search response: {e}")))?;

        let mut matches = parse_matches(&value);
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(limit);
        Ok(matches)
    }

    async fn stats(&self) -> PipelineResult<IndexStats> {
        let info = self.fetch_collection_info().await?;

        let points_count = info
            .get("result")
            .and_then(|r| r.get("points_count"))
            .and_then(Value::as_u64)
            .unwrap_or(0);

        let schema = schema_from_collection_info(&info, self.config.vector_name.as_deref())
            .unwrap_or(VectorSchema::Single);

        Ok(IndexStats {
            points_count,
            mode: schema.mode().to_string(),
            vector_name: schema.vector_name().map(ToString::to_string),
        })
    }
}

/// Derive the vector schema from a collection-info response.
///
/// A `vectors` object exposing a numeric `size` is a single-vector
/// collection; a mapping of named sub-vector configs is a named
/// collection, with `pinned` (when set) or the first name in the
/// collection's own declared order selected deterministically.
pub(crate) fn schema_from_collection_info(
    info: &Value,
    pinned: Option<&str>,
) -> Option<VectorSchema> {
    let result = info.get("result")?;
    let params = result
        .pointer("/config/params")
        .or_else(|| result.get("params"))?;
    let vectors = params.get("vectors")?;

    if vectors.get("size").is_some_and(Value::is_number) {
        return Some(VectorSchema::Single);
    }

    let map = vectors.as_object()?;
    if map.is_empty() {
        return None;
    }

    let names: Vec<String> = map.keys().cloned().collect();
    let selected = pinned
        .map(ToString::to_string)
        .unwrap_or_else(|| names[0].clone());

    Some(VectorSchema::Named { names, selected })
}

/// Translate backend match records into logical ranked results.
///
/// Qdrant point ids may be strings or integers; both become opaque id
/// strings here. Records without a parseable score are dropped.
pub(crate) fn parse_matches(value: &Value) -> Vec<ScoredMatch> {
    let Some(result) = value.get("result").and_then(Value::as_array) else {
        return Vec::new();
    };

    result
        .iter()
        .filter_map(|record| {
            let id = match record.get("id") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => return None,
            };
            let score = record.get("score").and_then(Value::as_f64)? as f32;
            let payload = record
                .get("payload")
                .cloned()
                .map(serde_json::from_value)
                .transpose()
                .ok()
                .flatten()
                .unwrap_or_default();

            Some(ScoredMatch { id, score, payload })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_schema_detected_from_numeric_size() {
        let info = json!({
            "result": { "config": { "params": { "vectors": { "size": 768, "distance": "Cosine" } } } }
        });
        assert_eq!(
            schema_from_collection_info(&info, None),
            Some(VectorSchema::Single)
        );
    }

    #[test]
    fn test_named_schema_selects_first_declared_name() {
        let info = json!({
            "result": { "config": { "params": { "vectors": {
                "text": { "size": 768, "distance": "Cosine" },
                "title": { "size": 384, "distance": "Cosine" }
            } } } }
        });
        let schema = schema_from_collection_info(&info, None).unwrap();
        assert_eq!(
            schema,
            VectorSchema::Named {
                names: vec!["text".to_string(), "title".to_string()],
                selected: "text".to_string(),
            }
        );
    }

    #[test]
    fn test_named_schema_honors_pinned_name() {
        let info = json!({
            "result": { "config": { "params": { "vectors": {
                "text": { "size": 768 },
                "title": { "size": 384 }
            } } } }
        });
        let schema = schema_from_collection_info(&info, Some("title")).unwrap();
        assert_eq!(schema.vector_name(), Some("title"));
    }

    #[test]
    fn test_top_level_params_fallback() {
        let info = json!({
            "result": { "params": { "vectors": { "size": 384, "distance": "Dot" } } }
        });
        assert_eq!(
            schema_from_collection_info(&info, None),
            Some(VectorSchema::Single)
        );
    }

    #[test]
    fn test_unrecognizable_info_yields_none() {
        assert_eq!(schema_from_collection_info(&json!({}), None), None);
        assert_eq!(
            schema_from_collection_info(&json!({ "result": { "config": {} } }), None),
            None
        );
        let empty_map = json!({ "result": { "config": { "params": { "vectors": {} } } } });
        assert_eq!(schema_from_collection_info(&empty_map, None), None);
    }

    #[test]
    fn test_parse_matches_handles_string_and_integer_ids() {
        let value = json!({ "result": [
            { "id": "uuid-1", "score": 0.9, "payload": { "title": "A", "text": "a" } },
            { "id": 42, "score": 0.5, "payload": { "title": "B", "text": "b" } }
        ] });
        let matches = parse_matches(&value);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, "uuid-1");
        assert_eq!(matches[1].id, "42");
        assert_eq!(matches[1].payload.title, "B");
    }

    #[test]
    fn test_parse_matches_tolerates_missing_payload() {
        let value = json!({ "result": [ { "id": "x", "score": 0.3 } ] });
        let matches = parse_matches(&value);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].payload.text, "");
    }

    #[test]
    fn test_parse_matches_empty_on_unexpected_shape() {
        assert!(parse_matches(&json!({ "status": "ok" })).is_empty());
        assert!(parse_matches(&json!({ "result": [{ "score": 0.1 }] })).is_empty());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let config = IndexConfig {
            url: "not-a-url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            QdrantIndex::new(config),
            Err(PipelineError::Config(_))
        ));
    }

    #[test]
    fn test_invalid_vector_mode_rejected() {
        let config = IndexConfig {
            url: "http://localhost:6333".to_string(),
            vector_mode: Some("multi".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            QdrantIndex::new(config),
            Err(PipelineError::Config(_))
        ));
    }

    #[test]
    fn test_forced_named_mode_defaults_vector_name() {
        let config = IndexConfig {
            url: "http://localhost:6333".to_string(),
            vector_mode: Some("named".to_string()),
            ..Default::default()
        };
        let index = QdrantIndex::new(config).unwrap();
        let schema = index.forced_schema().unwrap();
        assert_eq!(schema.vector_name(), Some("text"));
    }
}
