// ABOUTME: Shared domain models for the food-data aggregation layer
// ABOUTME: Re-exports the canonical item, measure, nutrient, and provider-info types
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Canonical food-data models produced by provider adapters
pub mod food;

pub use food::{FoodMeasure, NormalizedFoodItem, NutrientProfile, ProviderInfo};
