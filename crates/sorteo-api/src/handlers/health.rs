//! Health handlers

use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::state::AppState;

/// Liveness probe
pub async fn ping() -> Json<Value> {
    Json(json!({}))
}

/// Server time in epoch milliseconds
pub async fn server_time() -> Json<Value> {
    Json(json!({ "server_time": chrono::Utc::now().timestamp_millis() }))
}

/// Readiness probe, checks the database
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let db_ok = state.db.health_check().await.unwrap_or(false);
    Json(json!({ "healthy": db_ok, "postgres": db_ok }))
}
