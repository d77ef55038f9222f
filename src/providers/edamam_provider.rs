// ABOUTME: Edamam food database adapter with opaque session-cursor pagination
// ABOUTME: Commercial API using app-id/app-key headers and _links.next traversal
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Edamam Food Database adapter.
//!
//! Edamam paginates with opaque session links: each response carries a
//! `_links.next.href` that fetches the following page. The orchestrator
//! speaks simple 1-based page numbers, so this adapter keeps a per-query
//! cursor cache mapping page number to the href that serves it and walks
//! forward sequentially when a page has not been seen yet. The cache holds
//! one query session at a time; a new query resets it.
//!
//! Consumers of results from this provider are contractually required to
//! render attribution; this layer's obligation is reporting `source`
//! accurately.

use crate::config::environment::EdamamConfig;
use crate::models::{FoodMeasure, NormalizedFoodItem, NutrientProfile};
use crate::providers::core::{FoodDataProvider, Readiness};
use crate::providers::errors::{ProviderError, ProviderResult};
use crate::providers::http_client::shared_client;
use crate::providers::normalize;
use crate::providers::spi::{names, EdamamDescriptor, ProviderDescriptor};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Cursor cache for one query session: page number -> href serving it.
#[derive(Debug, Default)]
struct CursorSession {
    query: String,
    hrefs: HashMap<u32, String>,
}

/// Edamam Food Database provider adapter
pub struct EdamamProvider {
    config: EdamamConfig,
    descriptor: EdamamDescriptor,
    session: RwLock<CursorSession>,
    measure_policy: normalize::MeasurePolicy,
}

#[derive(Debug, Deserialize)]
struct ParserResponse {
    #[serde(default)]
    hints: Vec<Hint>,
    #[serde(rename = "_links", default)]
    links: Option<Links>,
}

#[derive(Debug, Deserialize)]
struct Links {
    #[serde(default)]
    next: Option<Link>,
}

#[derive(Debug, Deserialize)]
struct Link {
    href: String,
}

#[derive(Debug, Deserialize)]
struct Hint {
    food: EdamamFood,
    #[serde(default)]
    measures: Vec<EdamamMeasure>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EdamamFood {
    food_id: String,
    label: String,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    nutrients: EdamamNutrients,
}

#[derive(Debug, Default, Deserialize)]
struct EdamamNutrients {
    #[serde(rename = "ENERC_KCAL", default)]
    energy_kcal: Option<f64>,
    #[serde(rename = "PROCNT", default)]
    protein: Option<f64>,
    #[serde(rename = "FAT", default)]
    fat: Option<f64>,
    #[serde(rename = "CHOCDF", default)]
    carbs: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct EdamamMeasure {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    weight: Option<f64>,
}

impl EdamamProvider {
    /// Create an adapter from configuration.
    #[must_use]
    pub fn new(config: EdamamConfig) -> Self {
        Self {
            config,
            descriptor: EdamamDescriptor,
            session: RwLock::new(CursorSession::default()),
            measure_policy: normalize::first_selectable,
        }
    }

    /// Override the preferred-measure policy.
    #[must_use]
    pub fn with_measure_policy(mut self, policy: normalize::MeasurePolicy) -> Self {
        self.measure_policy = policy;
        self
    }

    /// Map one parser hint into the canonical item shape.
    ///
    /// Edamam nutrients are reported on a 100 g basis.
    fn to_item(&self, hint: Hint, barcode: Option<&str>) -> NormalizedFoodItem {
        let nutrients_per_100g = hint
            .food
            .nutrients
            .energy_kcal
            .filter(|kcal| kcal.is_finite() && *kcal >= 0.0)
            .map(|calories| NutrientProfile {
                calories,
                protein_g: hint.food.nutrients.protein,
                fat_g: hint.food.nutrients.fat,
                carbs_g: hint.food.nutrients.carbs,
            });

        let measures = hint
            .measures
            .into_iter()
            .filter_map(|m| {
                let unit = m.label?;
                Some(FoodMeasure {
                    label: format!("1 {unit}"),
                    gram_weight: m.weight.filter(|w| w.is_finite() && *w > 0.0),
                    quantity: Some(1.0),
                    unit: Some(unit),
                })
            })
            .collect();

        NormalizedFoodItem {
            id: hint.food.food_id,
            source: names::EDAMAM.to_owned(),
            description: hint.food.label,
            brand: hint.food.brand,
            barcode: barcode.map(str::to_owned),
            locale: None,
            available_measures: normalize::arrange_measures(measures, self.measure_policy),
            nutrients_per_100g,
        }
    }

    async fn get_parsed(&self, url: &str, query: &[(&str, &str)]) -> ProviderResult<ParserResponse> {
        let response = shared_client()
            .get(url)
            .query(query)
            .query(&[
                ("app_id", self.config.app_id.as_str()),
                ("app_key", self.config.app_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::from_transport(names::EDAMAM, &e))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ProviderError::from_status(names::EDAMAM, status, &text));
        }

        serde_json::from_str(&text).map_err(|e| ProviderError::MalformedResponse {
            provider: names::EDAMAM,
            context: "parser_response",
            source: e,
        })
    }

    /// Resolve the starting point for a sequential walk to `page`.
    ///
    /// Returns the highest already-cached page `<= page` and its href;
    /// page 1 is always reachable via the base request.
    async fn walk_start(&self, query: &str, page: u32) -> (u32, Option<String>) {
        let session = self.session.read().await;
        if session.query != query {
            return (1, None);
        }
        for p in (2..=page).rev() {
            if let Some(href) = session.hrefs.get(&p) {
                return (p, Some(href.clone()));
            }
        }
        (1, None)
    }

    async fn cache_next(&self, query: &str, next_page: u32, href: String) {
        let mut session = self.session.write().await;
        if session.query != query {
            session.query = query.to_owned();
            session.hrefs.clear();
        }
        session.hrefs.insert(next_page, href);
    }

    /// Fetch the requested 1-based page, traversing session cursors.
    async fn fetch_page(&self, query: &str, page: u32) -> ProviderResult<Vec<Hint>> {
        let (mut current, mut href) = self.walk_start(query, page).await;

        loop {
            let parsed = match &href {
                Some(url) => self.get_parsed(url, &[]).await?,
                None => {
                    let base = format!("{}/parser", self.config.base_url);
                    self.get_parsed(&base, &[("ingr", query), ("nutrition-type", "logging")])
                        .await?
                }
            };

            let next = parsed.links.and_then(|l| l.next).map(|n| n.href);
            if let Some(next_href) = &next {
                self.cache_next(query, current + 1, next_href.clone()).await;
            }

            if current == page {
                return Ok(parsed.hints);
            }

            match next {
                // Upstream result set ended before the requested page
                None => return Ok(Vec::new()),
                Some(next_href) => {
                    href = Some(next_href);
                    current += 1;
                }
            }
        }
    }
}

#[async_trait]
impl FoodDataProvider for EdamamProvider {
    fn descriptor(&self) -> &dyn ProviderDescriptor {
        &self.descriptor
    }

    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> ProviderResult<Vec<NormalizedFoodItem>> {
        let hints = self.fetch_page(query, page.max(1)).await?;
        Ok(hints
            .into_iter()
            .take(page_size as usize)
            .map(|h| self.to_item(h, None))
            .collect())
    }

    async fn lookup_barcode(&self, barcode: &str) -> ProviderResult<Vec<NormalizedFoodItem>> {
        let base = format!("{}/parser", self.config.base_url);
        let parsed = self.get_parsed(&base, &[("upc", barcode)]).await?;
        Ok(parsed
            .hints
            .into_iter()
            .take(1)
            .map(|h| self.to_item(h, Some(barcode)))
            .collect())
    }

    async fn check_readiness(&self) -> Readiness {
        if self.config.app_id.is_empty() || self.config.app_key.is_empty() {
            Readiness::unready("EDAMAM_APP_ID / EDAMAM_APP_KEY not configured")
        } else {
            Readiness::ready()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hint() -> Hint {
        Hint {
            food: EdamamFood {
                food_id: "food_a1gb9ubb72c7snbuxr3weagwv0dd".to_owned(),
                label: "Apple".to_owned(),
                brand: None,
                nutrients: EdamamNutrients {
                    energy_kcal: Some(52.0),
                    protein: Some(0.26),
                    fat: Some(0.17),
                    carbs: Some(13.81),
                },
            },
            measures: vec![
                EdamamMeasure {
                    label: Some("Whole".to_owned()),
                    weight: Some(182.0),
                },
                EdamamMeasure {
                    label: Some("Gram".to_owned()),
                    weight: Some(1.0),
                },
                EdamamMeasure {
                    label: Some("Pinch".to_owned()),
                    weight: None,
                },
            ],
        }
    }

    fn provider() -> EdamamProvider {
        EdamamProvider::new(EdamamConfig::default())
    }

    #[test]
    fn maps_hint_to_canonical_item() {
        let item = provider().to_item(hint(), None);
        assert_eq!(item.source, "edamam");
        assert_eq!(item.description, "Apple");
        let nutrients = item.nutrients_per_100g.unwrap();
        assert!((nutrients.calories - 52.0).abs() < f64::EPSILON);
        assert_eq!(item.available_measures.len(), 3);
        assert!(item.available_measures[0].is_selectable());
        assert!(!item.available_measures[2].is_selectable());
    }

    #[test]
    fn barcode_lookup_echoes_input_barcode() {
        let item = provider().to_item(hint(), Some("012345678905"));
        assert_eq!(item.barcode.as_deref(), Some("012345678905"));
    }

    #[tokio::test]
    async fn readiness_requires_both_credentials() {
        let provider = EdamamProvider::new(EdamamConfig {
            app_id: "abc".to_owned(),
            app_key: String::new(),
            ..EdamamConfig::default()
        });
        assert!(!provider.check_readiness().await.ready);
    }

    #[tokio::test]
    async fn cursor_cache_resets_on_new_query() {
        let provider = EdamamProvider::new(EdamamConfig::default());
        provider
            .cache_next("chicken", 2, "https://api/next-a".to_owned())
            .await;
        assert_eq!(
            provider.walk_start("chicken", 2).await,
            (2, Some("https://api/next-a".to_owned()))
        );
        // Different query must not reuse the session
        assert_eq!(provider.walk_start("rice", 2).await, (1, None));

        provider
            .cache_next("rice", 2, "https://api/next-b".to_owned())
            .await;
        assert_eq!(
            provider.walk_start("rice", 2).await,
            (2, Some("https://api/next-b".to_owned()))
        );
        // Old session was cleared
        assert_eq!(provider.walk_start("chicken", 2).await, (1, None));
    }

    #[tokio::test]
    async fn walk_start_picks_highest_cached_page_at_or_below_target() {
        let provider = EdamamProvider::new(EdamamConfig::default());
        provider
            .cache_next("chicken", 2, "https://api/p2".to_owned())
            .await;
        provider
            .cache_next("chicken", 3, "https://api/p3".to_owned())
            .await;
        assert_eq!(
            provider.walk_start("chicken", 5).await,
            (3, Some("https://api/p3".to_owned()))
        );
        assert_eq!(
            provider.walk_start("chicken", 2).await,
            (2, Some("https://api/p2".to_owned()))
        );
    }
}
