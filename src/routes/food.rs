// ABOUTME: Public food search route handler with query validation
// ABOUTME: Accepts free-text or barcode queries and returns canonical items
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Public food search route.
//!
//! `GET /food/search` takes exactly one of `q` (free text) or `barcode`.
//! Provider failures never surface here; the response degrades to an empty
//! item list with accurate provider metadata.

use crate::errors::{AppError, AppResult};
use crate::models::NormalizedFoodItem;
use crate::orchestrator::SearchTarget;
use crate::providers::DEFAULT_PAGE_SIZE;
use crate::server::AppState;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query parameters for `GET /food/search`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearchParams {
    /// Free-text query; mutually exclusive with `barcode`.
    pub q: Option<String>,
    /// Barcode digits; mutually exclusive with `q`.
    pub barcode: Option<String>,
    /// Explicit provider name; defaults to the first capable ready provider.
    pub provider: Option<String>,
    /// 1-based page number, text searches only.
    pub page: Option<u32>,
    /// Requested page size, clamped server-side.
    pub page_size: Option<u32>,
}

/// Response body for `GET /food/search`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearchResponse {
    /// Provider that served the request; empty when none was available.
    pub provider: String,
    /// Whether that provider supports barcode lookup.
    pub supports_barcode_lookup: bool,
    /// Canonical food items.
    pub items: Vec<NormalizedFoodItem>,
}

/// Food search routes implementation
pub struct FoodRoutes;

impl FoodRoutes {
    /// Create the public food search routes
    pub fn routes(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/food/search", get(search_handler))
            .with_state(state)
    }
}

/// Validate params into a search target.
///
/// Exactly one of `q` / `barcode` must be present and non-blank.
pub(crate) fn build_target(params: &FoodSearchParams) -> AppResult<SearchTarget> {
    let q = params.q.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let barcode = params
        .barcode
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    match (q, barcode) {
        (Some(query), None) => Ok(SearchTarget::Text {
            query: query.to_owned(),
            page: params.page.unwrap_or(1).max(1),
            page_size: params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }),
        (None, Some(code)) => {
            if code.chars().all(|c| c.is_ascii_digit()) {
                Ok(SearchTarget::Barcode {
                    barcode: code.to_owned(),
                })
            } else {
                Err(AppError::invalid_input("barcode must be digits only"))
            }
        }
        (Some(_), Some(_)) => Err(AppError::invalid_input(
            "provide exactly one of 'q' or 'barcode', not both",
        )),
        (None, None) => Err(AppError::invalid_input(
            "provide exactly one of 'q' or 'barcode'",
        )),
    }
}

async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FoodSearchParams>,
) -> AppResult<Json<FoodSearchResponse>> {
    let target = build_target(&params)?;

    if let Some(name) = params.provider.as_deref() {
        if state.registry.resolve(name).is_none() {
            return Err(AppError::not_found(format!("provider '{name}'")));
        }
    }

    let outcome = state
        .search_orchestrator
        .search(params.provider.as_deref(), target)
        .await;

    Ok(Json(FoodSearchResponse {
        provider: outcome.provider,
        supports_barcode_lookup: outcome.supports_barcode_lookup,
        items: outcome.items,
    }))
}
