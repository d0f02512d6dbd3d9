//! Health Route

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::AppContext;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: ModelInfo,
}

/// Loaded model summary
#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub classes: usize,
    pub label_cardinality: String,
    pub labels: Vec<&'static str>,
}

/// Health check handler
pub async fn health(State(ctx): State<Arc<AppContext>>) -> Json<HealthResponse> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let labels = ctx.engine.labels();
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: ctx.version.clone(),
        uptime_seconds: ctx.start_time.elapsed().as_secs(),
        model: ModelInfo {
            classes: ctx.engine.model_classes(),
            label_cardinality: labels.cardinality().as_str().to_string(),
            labels: labels.entries().iter().map(|e| e.name).collect(),
        },
    })
}
