//! Integration tests for the Qdrant adapter against a mock HTTP server.

use mockito::{Matcher, Server};
use serde_json::json;

use grimoire::domain::errors::PipelineError;
use grimoire::domain::models::{
    IndexConfig, Point, PointPayload, QueryFilters, VectorSchema,
};
use grimoire::domain::ports::VectorIndex;
use grimoire::adapters::qdrant::QdrantIndex;

fn index_config(url: &str) -> IndexConfig {
    IndexConfig {
        url: url.to_string(),
        api_key: Some("test-key".to_string()),
        collection: "grimoire".to_string(),
        ..Default::default()
    }
}

// Exactly-representable floats keep the JSON body matchers literal.
fn sample_point(id: &str) -> Point {
    Point {
        id: id.to_string(),
        vector: vec![0.5, 0.25, 0.125],
        payload: PointPayload {
            title: "Doc".to_string(),
            text: "chunk body".to_string(),
            ..Default::default()
        },
    }
}

#[tokio::test]
async fn probe_detects_single_vector_schema() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/collections/grimoire")
        .match_header("api-key", "test-key")
        .with_status(200)
        .with_body(
            json!({
                "result": { "config": { "params": {
                    "vectors": { "size": 768, "distance": "Cosine" }
                } } }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let index = QdrantIndex::new(index_config(&server.url())).unwrap();
    let schema = index.describe_schema().await;

    assert_eq!(schema, VectorSchema::Single);
    mock.assert_async().await;
}

#[tokio::test]
async fn probe_detects_named_schema_and_first_declared_name() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/collections/grimoire")
        .with_status(200)
        .with_body(
            json!({
                "result": { "config": { "params": { "vectors": {
                    "text": { "size": 768, "distance": "Cosine" },
                    "title": { "size": 384, "distance": "Cosine" }
                } } } }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let index = QdrantIndex::new(index_config(&server.url())).unwrap();
    let schema = index.describe_schema().await;

    assert_eq!(schema.mode(), "named");
    assert_eq!(schema.vector_name(), Some("text"));
}

#[tokio::test]
async fn failed_probe_degrades_to_single() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/collections/grimoire")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let index = QdrantIndex::new(index_config(&server.url())).unwrap();
    assert_eq!(index.describe_schema().await, VectorSchema::Single);
}

#[tokio::test]
async fn forced_mode_skips_the_probe() {
    // No mock is registered; a probe would 501 and degrade, but forced
    // named mode must not hit the network at all.
    let server = Server::new_async().await;
    let config = IndexConfig {
        vector_mode: Some("named".to_string()),
        vector_name: Some("body".to_string()),
        ..index_config(&server.url())
    };

    let index = QdrantIndex::new(config).unwrap();
    let schema = index.describe_schema().await;
    assert_eq!(schema.vector_name(), Some("body"));
}

#[tokio::test]
async fn upsert_single_schema_sends_vector_field() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/collections/grimoire/points")
        .match_query(Matcher::UrlEncoded("wait".into(), "true".into()))
        .match_header("api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "points": [{ "id": "p-1", "vector": [0.5, 0.25, 0.125] }]
        })))
        .with_status(200)
        .with_body(json!({ "result": { "status": "acknowledged" } }).to_string())
        .create_async()
        .await;

    let index = QdrantIndex::new(index_config(&server.url())).unwrap();
    let inserted = index
        .upsert(&[sample_point("p-1")], &VectorSchema::Single)
        .await
        .unwrap();

    assert_eq!(inserted, 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn upsert_named_schema_sends_vectors_map() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/collections/grimoire/points")
        .match_query(Matcher::UrlEncoded("wait".into(), "true".into()))
        .match_body(Matcher::PartialJson(json!({
            "points": [{ "id": "p-1", "vectors": { "text": [0.5, 0.25, 0.125] } }]
        })))
        .with_status(200)
        .with_body(json!({ "result": { "status": "acknowledged" } }).to_string())
        .create_async()
        .await;

    let schema = VectorSchema::Named {
        names: vec!["text".to_string()],
        selected: "text".to_string(),
    };
    let index = QdrantIndex::new(index_config(&server.url())).unwrap();
    index.upsert(&[sample_point("p-1")], &schema).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn upsert_failure_surfaces_status_and_body() {
    let mut server = Server::new_async().await;
    server
        .mock("PUT", "/collections/grimoire/points")
        .match_query(Matcher::UrlEncoded("wait".into(), "true".into()))
        .with_status(400)
        .with_body("wrong vector name")
        .create_async()
        .await;

    let index = QdrantIndex::new(index_config(&server.url())).unwrap();
    let err = index
        .upsert(&[sample_point("p-1")], &VectorSchema::Single)
        .await
        .unwrap_err();

    match err {
        PipelineError::StoreWriteFailed { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("wrong vector name"));
        }
        other => panic!("expected StoreWriteFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn search_sends_threshold_filters_and_named_vector() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/collections/grimoire/points/search")
        .match_body(Matcher::PartialJson(json!({
            "vector": { "name": "text", "vector": [1.0, 0.0] },
            "limit": 5,
            "with_payload": true,
            "score_threshold": 0.25,
            "filter": { "must": [
                { "key": "tags", "match": { "any": ["tax"] } },
                { "key": "created_at_ts", "range": { "gte": 1700000000000i64 } }
            ] }
        })))
        .with_status(200)
        .with_body(json!({ "result": [] }).to_string())
        .create_async()
        .await;

    let schema = VectorSchema::Named {
        names: vec!["text".to_string()],
        selected: "text".to_string(),
    };
    let filters = QueryFilters {
        tags: vec!["tax".to_string()],
        since_ts: Some(1_700_000_000_000),
    };

    let index = QdrantIndex::new(index_config(&server.url())).unwrap();
    let matches = index
        .search(&[1.0, 0.0], &filters, 5, 0.25, &schema)
        .await
        .unwrap();

    assert!(matches.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn search_results_sorted_descending_and_limited() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/collections/grimoire/points/search")
        .with_status(200)
        .with_body(
            json!({ "result": [
                { "id": "low", "score": 0.3, "payload": { "text": "c" } },
                { "id": "high", "score": 0.9, "payload": { "text": "a" } },
                { "id": "mid", "score": 0.6, "payload": { "text": "b" } }
            ] })
            .to_string(),
        )
        .create_async()
        .await;

    let index = QdrantIndex::new(index_config(&server.url())).unwrap();
    let matches = index
        .search(&[1.0], &QueryFilters::default(), 2, 0.2, &VectorSchema::Single)
        .await
        .unwrap();

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].id, "high");
    assert_eq!(matches[1].id, "mid");
}

#[tokio::test]
async fn search_backend_error_is_store_read_failed() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/collections/grimoire/points/search")
        .with_status(503)
        .with_body("overloaded")
        .create_async()
        .await;

    let index = QdrantIndex::new(index_config(&server.url())).unwrap();
    let err = index
        .search(&[1.0], &QueryFilters::default(), 5, 0.2, &VectorSchema::Single)
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::StoreReadFailed(_)));
}

#[tokio::test]
async fn stats_reports_point_count_and_schema() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/collections/grimoire")
        .with_status(200)
        .with_body(
            json!({
                "result": {
                    "points_count": 1234,
                    "config": { "params": { "vectors": { "size": 768, "distance": "Cosine" } } }
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let index = QdrantIndex::new(index_config(&server.url())).unwrap();
    let stats = index.stats().await.unwrap();

    assert_eq!(stats.points_count, 1234);
    assert_eq!(stats.mode, "single");
}
