//! JSON response envelope with the debug-mode status marker.
//!
//! Some upstream transport layers replace 5xx bodies with generic error
//! pages. When the caller opts in with `?debug=1`, server-side errors are
//! delivered with a 200 transport status and an explicit `__status` field
//! carrying the true status, so the error detail survives the transport.
//! The marker never masks an error from a caller that inspects it, and
//! non-5xx responses are never rewritten.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::domain::errors::PipelineError;

/// Marker field carrying the true status in debug mode.
pub const STATUS_MARKER: &str = "__status";

/// Build a JSON response, applying the debug marker to 5xx statuses.
pub fn respond(status: StatusCode, mut body: Value, debug: bool) -> Response {
    if debug && status.is_server_error() {
        if let Some(map) = body.as_object_mut() {
            map.insert(STATUS_MARKER.to_string(), Value::from(status.as_u16()));
        }
        return (StatusCode::OK, Json(body)).into_response();
    }

    (status, Json(body)).into_response()
}

/// Map a pipeline error to its transport status.
pub fn status_for(err: &PipelineError) -> StatusCode {
    match err {
        PipelineError::Validation(_) => StatusCode::BAD_REQUEST,
        PipelineError::Unauthorized => StatusCode::UNAUTHORIZED,
        PipelineError::EmbeddingFailed(_)
        | PipelineError::BadDimension { .. }
        | PipelineError::StoreWriteFailed { .. }
        | PipelineError::StoreReadFailed(_)
        | PipelineError::SynthesisFailed(_) => StatusCode::BAD_GATEWAY,
        PipelineError::Config(_) | PipelineError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Build the error response for a pipeline error.
pub fn error_response(err: &PipelineError, debug: bool) -> Response {
    let body = serde_json::json!({
        "error": err.kind(),
        "detail": err.to_string(),
    });
    respond(status_for(err), body, debug)
}
