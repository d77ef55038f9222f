// ABOUTME: Health check route handlers for service monitoring endpoints
// ABOUTME: Provides liveness and provider-aware readiness endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Health and readiness routes.
//!
//! `/health` is a pure liveness check. `/ready` reports 503 until at least
//! one food data provider passed its startup readiness probe.

use crate::server::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .with_state(state)
    }
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn ready_handler(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<serde_json::Value>) {
    let ready = state.registry.list_ready();
    let status = if ready.is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    let body = serde_json::json!({
        "status": if ready.is_empty() { "not_ready" } else { "ready" },
        "readyProviders": ready.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });
    (status, Json(body))
}
