// ABOUTME: Shared helpers for integration tests
// ABOUTME: Axum request builder and seeded synthetic registry construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub mod axum_test;

use nutrihub::config::ServerConfig;
use nutrihub::models::{NormalizedFoodItem, NutrientProfile};
use nutrihub::providers::synthetic_provider::{InjectedFailure, SyntheticProvider};
use nutrihub::providers::{FoodDataProvider, FoodProviderRegistry, Readiness};
use nutrihub::server::AppState;
use std::sync::Arc;

/// Build a canonical item for seeding the synthetic provider.
pub fn food_item(id: &str, description: &str, barcode: Option<&str>) -> NormalizedFoodItem {
    NormalizedFoodItem {
        id: id.to_owned(),
        source: "synthetic".to_owned(),
        description: description.to_owned(),
        brand: None,
        barcode: barcode.map(str::to_owned),
        locale: None,
        available_measures: Vec::new(),
        nutrients_per_100g: Some(NutrientProfile {
            calories: 165.0,
            protein_g: Some(31.0),
            fat_g: Some(3.6),
            carbs_g: Some(0.0),
        }),
    }
}

/// App state over a synthetic registry seeded with `items`.
pub async fn synthetic_state(items: Vec<NormalizedFoodItem>) -> Arc<AppState> {
    let provider = SyntheticProvider::with_items(items);
    let registry = FoodProviderRegistry::with_adapters(vec![
        Arc::new(provider) as Arc<dyn FoodDataProvider>
    ])
    .await;
    AppState::new(ServerConfig::default(), registry)
}

/// App state over a synthetic provider that fails every call.
pub async fn failing_state() -> Arc<AppState> {
    let provider = SyntheticProvider::new().with_failure(InjectedFailure::Unreachable);
    let registry = FoodProviderRegistry::with_adapters(vec![
        Arc::new(provider) as Arc<dyn FoodDataProvider>
    ])
    .await;
    AppState::new(ServerConfig::default(), registry)
}

/// App state over a synthetic provider whose readiness probe failed.
pub async fn unready_state(items: Vec<NormalizedFoodItem>) -> Arc<AppState> {
    let provider = SyntheticProvider::with_items(items)
        .with_readiness(Readiness::unready("credentials missing"));
    let registry = FoodProviderRegistry::with_adapters(vec![
        Arc::new(provider) as Arc<dyn FoodDataProvider>
    ])
    .await;
    AppState::new(ServerConfig::default(), registry)
}

/// App state with no providers at all.
pub async fn empty_state() -> Arc<AppState> {
    let registry = FoodProviderRegistry::with_adapters(Vec::new()).await;
    AppState::new(ServerConfig::default(), registry)
}
