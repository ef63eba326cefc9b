//! HTTP route handlers.
//!
//! Thin plumbing over the pipeline: request DTOs in, envelope out. All
//! validation that matters happens in the services, before any network
//! call fires.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;

use crate::domain::errors::PipelineError;
use crate::domain::models::{Config, DocumentInput, QueryFilters};
use crate::server::envelope::{error_response, respond};
use crate::services::Pipeline;

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub admin_token: Option<String>,
    pub health: HealthSnapshot,
}

/// Static configuration facts reported by the health endpoint.
///
/// Assembled once at startup; the endpoint makes no network calls.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthSnapshot {
    pub index_configured: bool,
    pub workers_ai_configured: bool,
    pub collection: String,
    pub embedding_model: String,
    pub completion_model: String,
}

impl HealthSnapshot {
    pub fn from_config(config: &Config) -> Self {
        Self {
            index_configured: !config.index.url.trim().is_empty(),
            workers_ai_configured: !config.workers_ai.account_id.trim().is_empty(),
            collection: config.index.collection.clone(),
            embedding_model: config.workers_ai.embedding_model.clone(),
            completion_model: config.workers_ai.completion_model.clone(),
        }
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/ingest", post(ingest))
        .route("/api/chat", post(chat))
        .route("/api/health", get(health))
        .route("/api/stats", get(stats))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct IngestRequest {
    title: Option<String>,
    #[serde(default)]
    text: String,
    url: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: String,
    #[serde(default)]
    tags: Vec<String>,
    since_days: Option<f64>,
}

fn debug_enabled(params: &HashMap<String, String>) -> bool {
    params.get("debug").is_some_and(|v| v == "1")
}

fn check_admin_token(expected: Option<&str>, headers: &HeaderMap) -> Result<(), PipelineError> {
    let Some(expected) = expected.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(());
    };

    let provided = headers
        .get("x-admin-token")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .unwrap_or_default();

    if provided == expected {
        Ok(())
    } else {
        Err(PipelineError::Unauthorized)
    }
}

async fn ingest(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    payload: Result<Json<IngestRequest>, JsonRejection>,
) -> Response {
    let debug = debug_enabled(&params);

    if let Err(err) = check_admin_token(state.admin_token.as_deref(), &headers) {
        return error_response(&err, debug);
    }

    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            let err = PipelineError::Validation(format!("invalid json: {rejection}"));
            return error_response(&err, debug);
        }
    };

    let doc = DocumentInput {
        title: request.title,
        text: request.text,
        url: request.url,
        tags: request.tags,
    };

    match state.pipeline.ingest(&doc).await {
        Ok(receipt) => {
            let mut body = serde_json::to_value(&receipt).unwrap_or_default();
            if let Some(map) = body.as_object_mut() {
                map.insert("ok".to_string(), serde_json::Value::Bool(true));
            }
            respond(StatusCode::OK, body, debug)
        }
        Err(err) => {
            tracing::error!(error = %err, kind = err.kind(), "ingestion failed");
            error_response(&err, debug)
        }
    }
}

async fn chat(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let debug = debug_enabled(&params);

    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            let err = PipelineError::Validation(format!("invalid json: {rejection}"));
            return error_response(&err, debug);
        }
    };

    let filters = build_filters(&request.tags, request.since_days);

    match state.pipeline.ask(&request.message, &filters).await {
        Ok(outcome) => {
            let body = serde_json::to_value(&outcome).unwrap_or_default();
            respond(StatusCode::OK, body, debug)
        }
        Err(err) => {
            tracing::error!(error = %err, kind = err.kind(), "chat failed");
            error_response(&err, debug)
        }
    }
}

async fn health(State(state): State<AppState>) -> Response {
    let mut body = serde_json::to_value(&state.health).unwrap_or_default();
    if let Some(map) = body.as_object_mut() {
        map.insert("ok".to_string(), serde_json::Value::Bool(true));
    }
    respond(StatusCode::OK, body, false)
}

async fn stats(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let debug = debug_enabled(&params);

    match state.pipeline.stats().await {
        Ok(stats) => {
            let body = serde_json::to_value(&stats).unwrap_or_default();
            respond(StatusCode::OK, body, debug)
        }
        Err(err) => error_response(&err, debug),
    }
}

/// Translate request fields into logical search filters.
pub(crate) fn build_filters(tags: &[String], since_days: Option<f64>) -> QueryFilters {
    let tags: Vec<String> = tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
        .collect();

    let since_ts = since_days
        .filter(|d| d.is_finite() && *d > 0.0)
        .map(|days| {
            let window_ms = (days * 86_400_000.0) as i64;
            Utc::now().timestamp_millis() - window_ms
        });

    QueryFilters { tags, since_ts }
}
