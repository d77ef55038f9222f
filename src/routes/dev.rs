// ABOUTME: Development-only route handlers for provider inspection and comparison
// ABOUTME: Exposes registry state and side-by-side provider search results
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Development routes.
//!
//! These endpoints expose per-provider detail that the public surface
//! deliberately hides: readiness diagnostics, raw failure strings, and
//! per-provider latency. Mounted separately so deployments can leave them
//! off the public router.

use crate::errors::AppResult;
use crate::models::{NormalizedFoodItem, ProviderInfo};
use crate::routes::food::FoodSearchParams;
use crate::server::AppState;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query parameters for `GET /dev/food/search`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonParams {
    /// Comma-separated provider names; empty means all registered.
    pub providers: Option<String>,
    /// Free-text query; mutually exclusive with `barcode`.
    pub q: Option<String>,
    /// Barcode digits; mutually exclusive with `q`.
    pub barcode: Option<String>,
    /// 1-based page number, text searches only.
    pub page: Option<u32>,
    /// Requested page size, clamped server-side.
    pub page_size: Option<u32>,
}

impl ComparisonParams {
    fn search_params(&self) -> FoodSearchParams {
        FoodSearchParams {
            q: self.q.clone(),
            barcode: self.barcode.clone(),
            provider: None,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Response body for `GET /dev/food/providers`
#[derive(Debug, Serialize)]
pub struct ProvidersResponse {
    /// Registry snapshot in preference order.
    pub providers: Vec<ProviderInfo>,
}

/// Response body for `GET /dev/food/search`
#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    /// Per-provider results in request order.
    pub results: Vec<ComparisonResult>,
}

/// One provider's leg of a comparison response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Provider metadata snapshot, flattened into the entry.
    #[serde(flatten)]
    pub provider: ProviderInfo,
    /// Items returned by the provider; empty on failure.
    pub items: Vec<NormalizedFoodItem>,
    /// Failure description when the call did not succeed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock call latency in milliseconds.
    pub elapsed_ms: u64,
}

/// Development routes implementation
pub struct DevRoutes;

impl DevRoutes {
    /// Create the development routes
    pub fn routes(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/dev/food/providers", get(providers_handler))
            .route("/dev/food/search", get(comparison_handler))
            .with_state(state)
    }
}

async fn providers_handler(State(state): State<Arc<AppState>>) -> Json<ProvidersResponse> {
    Json(ProvidersResponse {
        providers: state.registry.list(),
    })
}

async fn comparison_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ComparisonParams>,
) -> AppResult<Json<ComparisonResponse>> {
    let target = super::food::build_target(&params.search_params())?;

    let providers: Vec<String> = params
        .providers
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let entries = state
        .comparison_orchestrator
        .compare(&providers, &target)
        .await;

    Ok(Json(ComparisonResponse {
        results: entries
            .into_iter()
            .map(|entry| ComparisonResult {
                provider: entry.info,
                items: entry.items,
                error: entry.error,
                elapsed_ms: entry.elapsed_ms,
            })
            .collect(),
    }))
}
