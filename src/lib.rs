// ABOUTME: Library root for the nutrihub food-data aggregation service
// ABOUTME: Wires configuration, providers, orchestration, and the HTTP surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! NutriHub: a food-data aggregation layer for calorie tracking.
//!
//! Heterogeneous nutrition databases (USDA FoodData Central, Open Food
//! Facts, Edamam) expose incompatible schemas, units, and pagination
//! styles. This crate reconciles them behind one canonical item shape with
//! per-100g nutrient profiles, and serves search and barcode lookup over
//! HTTP.
//!
//! Architecture:
//! - [`providers`]: one adapter per upstream database plus the registry
//! - [`orchestrator`]: provider selection, degradation, and fan-out
//! - [`routes`] / [`server`]: the axum HTTP surface
//! - [`config`] / [`logging`] / [`errors`]: ambient concerns

pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod providers;
pub mod routes;
pub mod server;

pub use errors::{AppError, AppResult};
pub use models::{FoodMeasure, NormalizedFoodItem, NutrientProfile, ProviderInfo};
pub use providers::{FoodDataProvider, FoodProviderRegistry};
