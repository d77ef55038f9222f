// ABOUTME: Pure normalization engine converting vendor nutrient and serving data
// ABOUTME: Per-100g scaling, measure label dedup, and pluggable preferred-measure policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stateless transformations invoked by every adapter before results reach
//! an orchestrator.
//!
//! Nothing here performs IO or holds state; adapters feed vendor figures in
//! and canonical shapes come out. When a vendor provides no weight-anchored
//! nutrient figure the per-100g profile is omitted, never fabricated.

use crate::models::{FoodMeasure, NormalizedFoodItem, NutrientProfile};
use std::collections::HashSet;

/// Policy function choosing the preferred default measure.
///
/// Given the ordered measure list, returns the index of the measure a UI
/// should pre-select, or `None` when nothing qualifies. The heuristic is
/// adapter-configurable because vendors disagree on what a sensible default
/// serving is; no tie-break beyond vendor order is imposed here.
pub type MeasurePolicy = fn(&[FoodMeasure]) -> Option<usize>;

/// Default policy: first measure with a positive, finite gram weight.
#[must_use]
pub fn first_selectable(measures: &[FoodMeasure]) -> Option<usize> {
    measures.iter().position(FoodMeasure::is_selectable)
}

/// Scale a nutrient profile reported for `reported_grams` to a 100 g basis.
///
/// Returns `None` when the reported weight is non-positive or non-finite,
/// or when scaling would produce a negative calorie figure (vendor data
/// glitches must not violate the `calories >= 0` invariant).
#[must_use]
pub fn scale_to_100g(reported: &NutrientProfile, reported_grams: f64) -> Option<NutrientProfile> {
    if !reported_grams.is_finite() || reported_grams <= 0.0 {
        return None;
    }

    let factor = 100.0 / reported_grams;
    let calories = reported.calories * factor;
    if !calories.is_finite() || calories < 0.0 {
        return None;
    }

    Some(NutrientProfile {
        calories,
        protein_g: reported.protein_g.map(|v| v * factor),
        fat_g: reported.fat_g.map(|v| v * factor),
        carbs_g: reported.carbs_g.map(|v| v * factor),
    })
}

/// Deduplicate measures by label, first occurrence wins.
///
/// Vendor order is preserved because it is meaningful to the preferred
/// measure policy. Non-selectable measures are kept: the UI distinguishes
/// "has calories" from "informational only".
#[must_use]
pub fn dedup_measures(measures: Vec<FoodMeasure>) -> Vec<FoodMeasure> {
    let mut seen = HashSet::new();
    measures
        .into_iter()
        .filter(|m| seen.insert(m.label.clone()))
        .collect()
}

/// Deduplicate measures and surface the policy-preferred one first.
///
/// The policy sees the deduplicated list in vendor order; when it picks a
/// measure, that measure moves to the front so callers can pre-select
/// index 0. Every adapter runs its configured policy through this before
/// emitting `availableMeasures`.
#[must_use]
pub fn arrange_measures(measures: Vec<FoodMeasure>, policy: MeasurePolicy) -> Vec<FoodMeasure> {
    let mut measures = dedup_measures(measures);
    if let Some(index) = policy(&measures) {
        if index > 0 && index < measures.len() {
            let preferred = measures.remove(index);
            measures.insert(0, preferred);
        }
    }
    measures
}

/// Measures usable for calorie computation, in vendor order.
#[must_use]
pub fn selectable_measures(measures: &[FoodMeasure]) -> Vec<&FoodMeasure> {
    measures.iter().filter(|m| m.is_selectable()).collect()
}

/// Merge successive result pages for one query session, deduplicating by
/// item `id`.
///
/// Upstream result sets drift between page fetches, so a provider may
/// repeat an item already seen on an earlier page. First occurrence wins;
/// page order is preserved. The orchestrator is stateless across requests,
/// so this runs caller-side.
#[must_use]
pub fn merge_pages(pages: Vec<Vec<NormalizedFoodItem>>) -> Vec<NormalizedFoodItem> {
    let mut seen = HashSet::new();
    pages
        .into_iter()
        .flatten()
        .filter(|item| seen.insert(item.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(calories: f64) -> NutrientProfile {
        NutrientProfile {
            calories,
            protein_g: Some(10.0),
            fat_g: None,
            carbs_g: Some(20.0),
        }
    }

    #[test]
    fn scaling_is_linear_to_100g() {
        let scaled = scale_to_100g(&profile(130.0), 50.0).unwrap();
        assert!((scaled.calories - 260.0).abs() < f64::EPSILON);
        assert!((scaled.protein_g.unwrap() - 20.0).abs() < f64::EPSILON);
        assert!((scaled.carbs_g.unwrap() - 40.0).abs() < f64::EPSILON);
        assert!(scaled.fat_g.is_none());
    }

    #[test]
    fn hundred_gram_basis_is_identity() {
        let scaled = scale_to_100g(&profile(165.0), 100.0).unwrap();
        assert!((scaled.calories - 165.0).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_weight_yields_no_profile() {
        assert!(scale_to_100g(&profile(100.0), 0.0).is_none());
        assert!(scale_to_100g(&profile(100.0), -5.0).is_none());
        assert!(scale_to_100g(&profile(100.0), f64::NAN).is_none());
    }

    #[test]
    fn negative_calories_never_surface() {
        assert!(scale_to_100g(&profile(-20.0), 100.0).is_none());
    }

    #[test]
    fn duplicate_labels_collapse_to_first() {
        let measures = vec![
            FoodMeasure::with_grams("1 serving", 30.0),
            FoodMeasure::with_grams("1 cup", 240.0),
            FoodMeasure::with_grams("1 serving", 31.0),
        ];
        let deduped = dedup_measures(measures);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].label, "1 serving");
        assert!((deduped[0].gram_weight.unwrap() - 30.0).abs() < f64::EPSILON);
        assert_eq!(deduped[1].label, "1 cup");
    }

    #[test]
    fn dedup_keeps_informational_measures() {
        let measures = vec![
            FoodMeasure::labeled("1 pinch"),
            FoodMeasure::with_grams("100 g", 100.0),
        ];
        let deduped = dedup_measures(measures);
        assert_eq!(deduped.len(), 2);
        assert_eq!(selectable_measures(&deduped).len(), 1);
    }

    #[test]
    fn default_policy_picks_first_selectable() {
        let measures = vec![
            FoodMeasure::labeled("to taste"),
            FoodMeasure::with_grams("1 slice", 28.0),
            FoodMeasure::with_grams("1 loaf", 680.0),
        ];
        assert_eq!(first_selectable(&measures), Some(1));
    }

    #[test]
    fn default_policy_returns_none_when_nothing_qualifies() {
        let measures = vec![FoodMeasure::labeled("to taste")];
        assert_eq!(first_selectable(&measures), None);
    }

    #[test]
    fn arranged_measures_lead_with_the_preferred_one() {
        fn heaviest(measures: &[FoodMeasure]) -> Option<usize> {
            measures
                .iter()
                .enumerate()
                .filter(|(_, m)| m.is_selectable())
                .max_by(|(_, a), (_, b)| a.gram_weight.partial_cmp(&b.gram_weight).unwrap())
                .map(|(i, _)| i)
        }

        let measures = vec![
            FoodMeasure::with_grams("1 slice", 28.0),
            FoodMeasure::with_grams("1 loaf", 680.0),
        ];
        let arranged = arrange_measures(measures, heaviest);
        assert_eq!(arranged[0].label, "1 loaf");
        assert_eq!(arranged[1].label, "1 slice");
    }

    #[test]
    fn arranging_keeps_vendor_order_when_the_first_measure_qualifies() {
        let measures = vec![
            FoodMeasure::with_grams("100 g", 100.0),
            FoodMeasure::with_grams("1 cup", 240.0),
            FoodMeasure::with_grams("100 g", 101.0),
        ];
        let arranged = arrange_measures(measures, first_selectable);
        assert_eq!(arranged.len(), 2);
        assert_eq!(arranged[0].label, "100 g");
        assert_eq!(arranged[1].label, "1 cup");
    }

    fn item(id: &str) -> NormalizedFoodItem {
        NormalizedFoodItem {
            id: id.to_owned(),
            source: "test".to_owned(),
            description: id.to_owned(),
            brand: None,
            barcode: None,
            locale: None,
            available_measures: Vec::new(),
            nutrients_per_100g: None,
        }
    }

    #[test]
    fn page_merge_never_duplicates_ids() {
        // Item "b" drifted from page 1 into page 2 upstream
        let page1 = vec![item("a"), item("b")];
        let page2 = vec![item("b"), item("c")];
        let merged = merge_pages(vec![page1, page2]);
        let ids: Vec<&str> = merged.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
