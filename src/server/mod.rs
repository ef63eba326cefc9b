//! HTTP server layer (axum).

pub mod envelope;
pub mod routes;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::domain::models::Config;
use crate::services::Pipeline;

pub use routes::{router, AppState, HealthSnapshot};

/// Bind and serve the API until the process is stopped.
pub async fn serve(config: &Config, pipeline: Arc<Pipeline>) -> Result<()> {
    let state = AppState {
        pipeline,
        admin_token: config.server.admin_token.clone(),
        health: HealthSnapshot::from_config(config),
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "serving API");

    axum::serve(listener, router(state))
        .await
        .context("server error")
}
