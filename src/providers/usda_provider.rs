// ABOUTME: USDA FoodData Central adapter for free-text nutrition search
// ABOUTME: Offset-paginated, API-key readiness, rate limited to the published quota
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! USDA `FoodData` Central adapter.
//!
//! The API is free and requires only an API key, so readiness is fully
//! determined by configuration presence — no startup network call. USDA
//! publishes a per-key quota, enforced here with a sliding-window limiter.
//! Barcode lookup is not offered by the search API; the adapter is
//! text-search only.
//!
//! API reference: <https://fdc.nal.usda.gov/api-guide.html>

use crate::config::environment::UsdaConfig;
use crate::models::{FoodMeasure, NormalizedFoodItem, NutrientProfile};
use crate::providers::core::{FoodDataProvider, Readiness};
use crate::providers::errors::{ProviderError, ProviderResult};
use crate::providers::http_client::shared_client;
use crate::providers::normalize;
use crate::providers::rate_limit::RateLimiter;
use crate::providers::spi::{names, ProviderDescriptor, UsdaDescriptor};
use async_trait::async_trait;
use serde::Deserialize;

/// USDA nutrient number for energy in kcal
const NUTRIENT_ENERGY_KCAL: u32 = 1008;
/// USDA nutrient number for protein
const NUTRIENT_PROTEIN: u32 = 1003;
/// USDA nutrient number for total fat
const NUTRIENT_FAT: u32 = 1004;
/// USDA nutrient number for carbohydrate by difference
const NUTRIENT_CARBS: u32 = 1005;

/// USDA `FoodData` Central provider adapter
pub struct UsdaProvider {
    config: UsdaConfig,
    descriptor: UsdaDescriptor,
    rate_limiter: RateLimiter,
    measure_policy: normalize::MeasurePolicy,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<UsdaFood>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsdaFood {
    fdc_id: u64,
    description: String,
    #[serde(default)]
    brand_owner: Option<String>,
    #[serde(default)]
    gtin_upc: Option<String>,
    #[serde(default)]
    serving_size: Option<f64>,
    #[serde(default)]
    serving_size_unit: Option<String>,
    #[serde(default)]
    household_serving_full_text: Option<String>,
    #[serde(default)]
    food_nutrients: Vec<UsdaFoodNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsdaFoodNutrient {
    nutrient_id: u32,
    #[serde(default)]
    value: Option<f64>,
}

impl UsdaProvider {
    /// Create an adapter from configuration.
    #[must_use]
    pub fn new(config: UsdaConfig) -> Self {
        let rate_limiter = RateLimiter::per_minute(config.rate_limit_per_minute);
        Self {
            config,
            descriptor: UsdaDescriptor,
            rate_limiter,
            measure_policy: normalize::first_selectable,
        }
    }

    /// Override the preferred-measure policy.
    #[must_use]
    pub fn with_measure_policy(mut self, policy: normalize::MeasurePolicy) -> Self {
        self.measure_policy = policy;
        self
    }

    fn nutrient(food: &UsdaFood, id: u32) -> Option<f64> {
        food.food_nutrients
            .iter()
            .find(|n| n.nutrient_id == id)
            .and_then(|n| n.value)
    }

    /// Map one USDA search hit into the canonical item shape.
    ///
    /// USDA reports `foodNutrients` on a 100 g basis already, so no
    /// rescaling is needed; a missing or negative energy figure drops the
    /// profile rather than fabricating one.
    fn to_item(&self, food: UsdaFood) -> NormalizedFoodItem {
        let nutrients_per_100g = Self::nutrient(&food, NUTRIENT_ENERGY_KCAL)
            .filter(|kcal| kcal.is_finite() && *kcal >= 0.0)
            .map(|calories| NutrientProfile {
                calories,
                protein_g: Self::nutrient(&food, NUTRIENT_PROTEIN),
                fat_g: Self::nutrient(&food, NUTRIENT_FAT),
                carbs_g: Self::nutrient(&food, NUTRIENT_CARBS),
            });

        let mut measures = vec![FoodMeasure::with_grams("100 g", 100.0)];
        if let Some(label) = &food.household_serving_full_text {
            let grams = food
                .serving_size
                .filter(|_| Self::is_gram_unit(food.serving_size_unit.as_deref()));
            measures.push(FoodMeasure {
                label: label.clone(),
                gram_weight: grams,
                quantity: None,
                unit: None,
            });
        }

        NormalizedFoodItem {
            id: food.fdc_id.to_string(),
            source: names::USDA.to_owned(),
            description: food.description,
            brand: food.brand_owner,
            barcode: food.gtin_upc,
            locale: None,
            available_measures: normalize::arrange_measures(measures, self.measure_policy),
            nutrients_per_100g,
        }
    }

    fn is_gram_unit(unit: Option<&str>) -> bool {
        matches!(unit, Some(u) if u.eq_ignore_ascii_case("g") || u.eq_ignore_ascii_case("grm"))
    }
}

#[async_trait]
impl FoodDataProvider for UsdaProvider {
    fn descriptor(&self) -> &dyn ProviderDescriptor {
        &self.descriptor
    }

    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> ProviderResult<Vec<NormalizedFoodItem>> {
        self.rate_limiter.acquire().await;

        let url = format!("{}/foods/search", self.config.base_url);
        let response = shared_client()
            .get(&url)
            .query(&[
                ("query", query),
                ("pageNumber", &page.to_string()),
                ("pageSize", &page_size.to_string()),
                ("api_key", &self.config.api_key),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::from_transport(names::USDA, &e))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ProviderError::from_status(names::USDA, status, &text));
        }

        let parsed: SearchResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::MalformedResponse {
                provider: names::USDA,
                context: "search_response",
                source: e,
            })?;

        Ok(parsed.foods.into_iter().map(|f| self.to_item(f)).collect())
    }

    async fn check_readiness(&self) -> Readiness {
        if self.config.api_key.is_empty() {
            Readiness::unready("USDA_API_KEY not configured")
        } else {
            Readiness::ready()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> UsdaProvider {
        UsdaProvider::new(UsdaConfig::default())
    }

    fn branded_food() -> UsdaFood {
        UsdaFood {
            fdc_id: 171_477,
            description: "Chicken, breast, meat only, cooked, roasted".to_owned(),
            brand_owner: Some("Acme Farms".to_owned()),
            gtin_upc: Some("012345678905".to_owned()),
            serving_size: Some(85.0),
            serving_size_unit: Some("g".to_owned()),
            household_serving_full_text: Some("3 oz".to_owned()),
            food_nutrients: vec![
                UsdaFoodNutrient {
                    nutrient_id: NUTRIENT_ENERGY_KCAL,
                    value: Some(165.0),
                },
                UsdaFoodNutrient {
                    nutrient_id: NUTRIENT_PROTEIN,
                    value: Some(31.02),
                },
                UsdaFoodNutrient {
                    nutrient_id: NUTRIENT_FAT,
                    value: Some(3.57),
                },
                UsdaFoodNutrient {
                    nutrient_id: NUTRIENT_CARBS,
                    value: Some(0.0),
                },
            ],
        }
    }

    #[test]
    fn maps_usda_food_to_canonical_item() {
        let item = provider().to_item(branded_food());
        assert_eq!(item.id, "171477");
        assert_eq!(item.source, "usda");
        assert_eq!(item.barcode.as_deref(), Some("012345678905"));

        let nutrients = item.nutrients_per_100g.unwrap();
        assert!((nutrients.calories - 165.0).abs() < f64::EPSILON);
        assert!((nutrients.protein_g.unwrap() - 31.02).abs() < f64::EPSILON);

        assert_eq!(item.available_measures.len(), 2);
        assert_eq!(item.available_measures[0].label, "100 g");
        assert_eq!(item.available_measures[1].label, "3 oz");
        assert!((item.available_measures[1].gram_weight.unwrap() - 85.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_energy_omits_nutrient_profile() {
        let mut food = branded_food();
        food.food_nutrients.retain(|n| n.nutrient_id != NUTRIENT_ENERGY_KCAL);
        let item = provider().to_item(food);
        assert!(item.nutrients_per_100g.is_none());
    }

    #[test]
    fn negative_energy_omits_nutrient_profile() {
        let mut food = branded_food();
        food.food_nutrients[0].value = Some(-1.0);
        let item = provider().to_item(food);
        assert!(item.nutrients_per_100g.is_none());
    }

    #[test]
    fn non_gram_serving_is_informational_only() {
        let mut food = branded_food();
        food.serving_size_unit = Some("ml".to_owned());
        let item = provider().to_item(food);
        assert!(item.available_measures[1].gram_weight.is_none());
        assert!(!item.available_measures[1].is_selectable());
    }

    #[test]
    fn configured_measure_policy_reorders_the_default_measure() {
        fn last_selectable(measures: &[FoodMeasure]) -> Option<usize> {
            measures.iter().rposition(FoodMeasure::is_selectable)
        }

        let item = provider()
            .with_measure_policy(last_selectable)
            .to_item(branded_food());
        // The household serving leads instead of the synthetic "100 g" entry
        assert_eq!(item.available_measures[0].label, "3 oz");
        assert_eq!(item.available_measures[1].label, "100 g");
    }

    #[tokio::test]
    async fn readiness_requires_api_key() {
        let provider = UsdaProvider::new(UsdaConfig {
            api_key: String::new(),
            ..UsdaConfig::default()
        });
        let readiness = provider.check_readiness().await;
        assert!(!readiness.ready);
        assert!(readiness.detail.unwrap().contains("USDA_API_KEY"));
    }

    #[tokio::test]
    async fn barcode_lookup_is_unsupported() {
        let provider = UsdaProvider::new(UsdaConfig {
            api_key: "demo".to_owned(),
            ..UsdaConfig::default()
        });
        let err = provider.lookup_barcode("012345678905").await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::UnsupportedOperation { provider: "usda", .. }
        ));
    }
}
