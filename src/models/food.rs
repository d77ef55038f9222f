// ABOUTME: Canonical food-data models shared by all provider adapters
// ABOUTME: NormalizedFoodItem, FoodMeasure, NutrientProfile, and ProviderInfo definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

/// Canonical per-100g nutrient profile.
///
/// Every adapter converts vendor nutrient figures to this 100-gram basis
/// before returning results. `calories` is always present when the profile
/// exists; the macros are optional because not every vendor reports them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    /// Kilocalories per 100 g
    pub calories: f64,
    /// Protein grams per 100 g
    #[serde(rename = "protein", skip_serializing_if = "Option::is_none")]
    pub protein_g: Option<f64>,
    /// Fat grams per 100 g
    #[serde(rename = "fat", skip_serializing_if = "Option::is_none")]
    pub fat_g: Option<f64>,
    /// Carbohydrate grams per 100 g
    #[serde(rename = "carbs", skip_serializing_if = "Option::is_none")]
    pub carbs_g: Option<f64>,
}

/// One selectable serving representation for a food item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodMeasure {
    /// Human-readable unit name ("1 cup", "100 g", "1 slice")
    pub label: String,
    /// Gram equivalent, when the vendor supplies one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gram_weight: Option<f64>,
    /// Structured quantity component of the label (e.g., 1.0 for "1 cup")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    /// Structured unit component of the label (e.g., "cup")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl FoodMeasure {
    /// Build a measure with only a display label.
    #[must_use]
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            gram_weight: None,
            quantity: None,
            unit: None,
        }
    }

    /// Build a measure with a label and gram equivalent.
    #[must_use]
    pub fn with_grams(label: impl Into<String>, gram_weight: f64) -> Self {
        Self {
            label: label.into(),
            gram_weight: Some(gram_weight),
            quantity: None,
            unit: None,
        }
    }

    /// Whether this measure can be used to compute calories.
    ///
    /// Only measures with a positive, finite gram weight are selectable;
    /// the rest are informational only.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.gram_weight.is_some_and(|g| g.is_finite() && g > 0.0)
    }
}

/// Canonical search result produced by every provider adapter.
///
/// Items are constructed fresh per request and never persisted by the
/// aggregation layer. `id` is stable only within one provider's namespace
/// and within one query session; callers merging pages deduplicate by it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedFoodItem {
    /// Provider-scoped stable identifier
    pub id: String,
    /// Name of the provider that produced this item
    pub source: String,
    /// Display name
    pub description: String,
    /// Brand name, when the provider supplies it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Product barcode (GTIN/UPC), when the provider supplies it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    /// Provenance locale, when the provider supplies it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Ordered, label-deduplicated serving representations; may be empty
    pub available_measures: Vec<FoodMeasure>,
    /// Canonical nutrient profile on a 100 g basis, when derivable
    #[serde(rename = "nutrientsPer100g", skip_serializing_if = "Option::is_none")]
    pub nutrients_per_100g: Option<NutrientProfile>,
}

/// Registry entry describing one configured provider.
///
/// Constructed once at process startup and immutable thereafter; readiness
/// is never re-derived per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    /// Provider capability tag, unique per configured provider
    pub name: String,
    /// Display name
    pub label: String,
    /// Whether this provider type supports exact barcode lookup
    pub supports_barcode_lookup: bool,
    /// Startup-time readiness determination
    pub ready: bool,
    /// Human-readable reason when `ready` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_with_positive_finite_grams_is_selectable() {
        assert!(FoodMeasure::with_grams("1 cup", 240.0).is_selectable());
    }

    #[test]
    fn measure_without_grams_is_not_selectable() {
        assert!(!FoodMeasure::labeled("1 pinch").is_selectable());
    }

    #[test]
    fn measure_with_nonpositive_or_nonfinite_grams_is_not_selectable() {
        assert!(!FoodMeasure::with_grams("bad", 0.0).is_selectable());
        assert!(!FoodMeasure::with_grams("bad", -3.0).is_selectable());
        assert!(!FoodMeasure::with_grams("bad", f64::NAN).is_selectable());
        assert!(!FoodMeasure::with_grams("bad", f64::INFINITY).is_selectable());
    }

    #[test]
    fn item_serializes_with_camel_case_wire_names() {
        let item = NormalizedFoodItem {
            id: "171477".to_owned(),
            source: "usda".to_owned(),
            description: "Chicken, breast, roasted".to_owned(),
            brand: None,
            barcode: None,
            locale: None,
            available_measures: vec![FoodMeasure::with_grams("100 g", 100.0)],
            nutrients_per_100g: Some(NutrientProfile {
                calories: 165.0,
                protein_g: Some(31.02),
                fat_g: Some(3.57),
                carbs_g: Some(0.0),
            }),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("availableMeasures").is_some());
        assert!(json.get("nutrientsPer100g").is_some());
        assert_eq!(json["nutrientsPer100g"]["protein"], 31.02);
        assert!(json.get("brand").is_none());
    }
}
