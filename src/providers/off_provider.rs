// ABOUTME: Open Food Facts adapter for crowd-sourced barcode and product search
// ABOUTME: Keyless API with a lightweight reachability probe for startup readiness
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Open Food Facts adapter.
//!
//! The API requires no credentials, so readiness cannot be determined from
//! configuration alone; the startup check issues one lightweight probe
//! against the base URL instead. Products carry crowd-sourced `nutriments`
//! which are usually on a 100 g basis; when only per-serving figures exist
//! they are rescaled through the normalization engine.

use crate::config::environment::OpenFoodFactsConfig;
use crate::models::{FoodMeasure, NormalizedFoodItem, NutrientProfile};
use crate::providers::core::{FoodDataProvider, Readiness};
use crate::providers::errors::{ProviderError, ProviderResult};
use crate::providers::http_client::shared_client;
use crate::providers::normalize;
use crate::providers::spi::{names, OpenFoodFactsDescriptor, ProviderDescriptor};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Open Food Facts provider adapter
pub struct OpenFoodFactsProvider {
    config: OpenFoodFactsConfig,
    descriptor: OpenFoodFactsDescriptor,
    measure_policy: normalize::MeasurePolicy,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<OffProduct>,
}

#[derive(Debug, Deserialize)]
struct ProductResponse {
    status: u8,
    #[serde(default)]
    product: Option<OffProduct>,
}

#[derive(Debug, Default, Deserialize)]
struct OffProduct {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    brands: Option<String>,
    #[serde(default)]
    lang: Option<String>,
    #[serde(default)]
    serving_size: Option<String>,
    #[serde(default)]
    serving_quantity: Option<f64>,
    #[serde(default)]
    nutriments: OffNutriments,
}

#[derive(Debug, Default, Deserialize)]
struct OffNutriments {
    #[serde(rename = "energy-kcal_100g", default)]
    energy_kcal_100g: Option<f64>,
    #[serde(rename = "proteins_100g", default)]
    proteins_100g: Option<f64>,
    #[serde(rename = "fat_100g", default)]
    fat_100g: Option<f64>,
    #[serde(rename = "carbohydrates_100g", default)]
    carbohydrates_100g: Option<f64>,
    #[serde(rename = "energy-kcal_serving", default)]
    energy_kcal_serving: Option<f64>,
    #[serde(rename = "proteins_serving", default)]
    proteins_serving: Option<f64>,
    #[serde(rename = "fat_serving", default)]
    fat_serving: Option<f64>,
    #[serde(rename = "carbohydrates_serving", default)]
    carbohydrates_serving: Option<f64>,
}

impl OpenFoodFactsProvider {
    /// Create an adapter from configuration.
    #[must_use]
    pub fn new(config: OpenFoodFactsConfig) -> Self {
        Self {
            config,
            descriptor: OpenFoodFactsDescriptor,
            measure_policy: normalize::first_selectable,
        }
    }

    /// Override the preferred-measure policy.
    #[must_use]
    pub fn with_measure_policy(mut self, policy: normalize::MeasurePolicy) -> Self {
        self.measure_policy = policy;
        self
    }

    /// Derive the per-100g profile, preferring native 100 g figures and
    /// falling back to per-serving figures rescaled by serving weight.
    fn nutrients(product: &OffProduct) -> Option<NutrientProfile> {
        if let Some(kcal) = product.nutriments.energy_kcal_100g {
            if kcal.is_finite() && kcal >= 0.0 {
                return Some(NutrientProfile {
                    calories: kcal,
                    protein_g: product.nutriments.proteins_100g,
                    fat_g: product.nutriments.fat_100g,
                    carbs_g: product.nutriments.carbohydrates_100g,
                });
            }
        }

        let per_serving = NutrientProfile {
            calories: product.nutriments.energy_kcal_serving?,
            protein_g: product.nutriments.proteins_serving,
            fat_g: product.nutriments.fat_serving,
            carbs_g: product.nutriments.carbohydrates_serving,
        };
        normalize::scale_to_100g(&per_serving, product.serving_quantity?)
    }

    fn to_item(&self, product: OffProduct) -> Option<NormalizedFoodItem> {
        let id = product.code.clone()?;
        let description = product
            .product_name
            .clone()
            .filter(|name| !name.trim().is_empty())?;

        let mut measures = vec![FoodMeasure::with_grams("100 g", 100.0)];
        if let Some(label) = &product.serving_size {
            measures.push(FoodMeasure {
                label: label.clone(),
                gram_weight: product
                    .serving_quantity
                    .filter(|g| g.is_finite() && *g > 0.0),
                quantity: None,
                unit: None,
            });
        }

        let nutrients_per_100g = Self::nutrients(&product);

        Some(NormalizedFoodItem {
            id: id.clone(),
            source: names::OPEN_FOOD_FACTS.to_owned(),
            description,
            brand: product.brands,
            barcode: Some(id),
            locale: product.lang,
            available_measures: normalize::arrange_measures(measures, self.measure_policy),
            nutrients_per_100g,
        })
    }
}

#[async_trait]
impl FoodDataProvider for OpenFoodFactsProvider {
    fn descriptor(&self) -> &dyn ProviderDescriptor {
        &self.descriptor
    }

    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> ProviderResult<Vec<NormalizedFoodItem>> {
        let url = format!("{}/cgi/search.pl", self.config.base_url);
        let response = shared_client()
            .get(&url)
            .query(&[
                ("search_terms", query),
                ("page", &page.to_string()),
                ("page_size", &page_size.to_string()),
                ("action", "process"),
                ("json", "1"),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::from_transport(names::OPEN_FOOD_FACTS, &e))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ProviderError::from_status(
                names::OPEN_FOOD_FACTS,
                status,
                &text,
            ));
        }

        let parsed: SearchResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::MalformedResponse {
                provider: names::OPEN_FOOD_FACTS,
                context: "search_response",
                source: e,
            })?;

        Ok(parsed
            .products
            .into_iter()
            .filter_map(|p| self.to_item(p))
            .collect())
    }

    async fn lookup_barcode(&self, barcode: &str) -> ProviderResult<Vec<NormalizedFoodItem>> {
        let url = format!("{}/api/v2/product/{barcode}.json", self.config.base_url);
        let response = shared_client()
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::from_transport(names::OPEN_FOOD_FACTS, &e))?;

        let status = response.status();
        // Open Food Facts answers 404 for unknown barcodes; that is an
        // empty result, not a provider failure.
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ProviderError::from_status(
                names::OPEN_FOOD_FACTS,
                status,
                &text,
            ));
        }

        let parsed: ProductResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::MalformedResponse {
                provider: names::OPEN_FOOD_FACTS,
                context: "product_response",
                source: e,
            })?;

        if parsed.status != 1 {
            return Ok(Vec::new());
        }

        Ok(parsed
            .product
            .and_then(|p| self.to_item(p))
            .into_iter()
            .collect())
    }

    async fn check_readiness(&self) -> Readiness {
        // Keyless API: the only thing that can be wrong is reachability.
        let probe = shared_client()
            .get(&self.config.base_url)
            .timeout(Duration::from_secs(self.config.probe_timeout_secs))
            .send()
            .await;

        match probe {
            Ok(response) if response.status().is_success() => Readiness::ready(),
            Ok(response) => Readiness::unready(format!(
                "reachability probe returned HTTP {}",
                response.status()
            )),
            Err(e) => Readiness::unready(format!("reachability probe failed: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> OpenFoodFactsProvider {
        OpenFoodFactsProvider::new(OpenFoodFactsConfig::default())
    }

    fn product() -> OffProduct {
        OffProduct {
            code: Some("3017620422003".to_owned()),
            product_name: Some("Hazelnut spread".to_owned()),
            brands: Some("Ferrero".to_owned()),
            lang: Some("fr".to_owned()),
            serving_size: Some("1 tbsp (15 g)".to_owned()),
            serving_quantity: Some(15.0),
            nutriments: OffNutriments {
                energy_kcal_100g: Some(539.0),
                proteins_100g: Some(6.3),
                fat_100g: Some(30.9),
                carbohydrates_100g: Some(57.5),
                ..OffNutriments::default()
            },
        }
    }

    #[test]
    fn maps_product_with_native_100g_figures() {
        let item = provider().to_item(product()).unwrap();
        assert_eq!(item.source, "openfoodfacts");
        assert_eq!(item.barcode.as_deref(), Some("3017620422003"));
        assert_eq!(item.locale.as_deref(), Some("fr"));
        let nutrients = item.nutrients_per_100g.unwrap();
        assert!((nutrients.calories - 539.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rescales_serving_only_figures_to_100g() {
        let mut p = product();
        p.nutriments = OffNutriments {
            energy_kcal_serving: Some(80.0),
            proteins_serving: Some(1.0),
            ..OffNutriments::default()
        };
        let item = provider().to_item(p).unwrap();
        let nutrients = item.nutrients_per_100g.unwrap();
        // 80 kcal per 15 g serving
        assert!((nutrients.calories - 80.0 * 100.0 / 15.0).abs() < 1e-9);
        assert!((nutrients.protein_g.unwrap() - 1.0 * 100.0 / 15.0).abs() < 1e-9);
    }

    #[test]
    fn serving_without_weight_omits_profile() {
        let mut p = product();
        p.serving_quantity = None;
        p.nutriments = OffNutriments {
            energy_kcal_serving: Some(80.0),
            ..OffNutriments::default()
        };
        let item = provider().to_item(p).unwrap();
        assert!(item.nutrients_per_100g.is_none());
        // The serving measure stays visible but is not selectable
        assert!(!item.available_measures[1].is_selectable());
    }

    #[test]
    fn nameless_products_are_dropped() {
        let mut p = product();
        p.product_name = Some("   ".to_owned());
        assert!(provider().to_item(p).is_none());
    }
}
