use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::{Category, Confidence, EstimateMode, ShoppingListItem};

/// Per-call estimator policy. Built from application config so tests can
/// override thresholds without touching globals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    pub default_mode: EstimateMode,
    /// Fewer resolved items than this locks the estimate outright.
    pub min_priced_items: usize,
    /// Missing fraction above this drops confidence from medium to low.
    pub medium_missing_ratio: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            default_mode: EstimateMode::Standard,
            min_priced_items: 3,
            medium_missing_ratio: 0.2,
        }
    }
}

/// A unit price for one mode, either category-wide (`name: None`) or pinned
/// to a specific ingredient name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBaseline {
    pub name: Option<String>,
    pub category: Category,
    pub mode: EstimateMode,
    pub unit_price: f64,
    pub updated_at: OffsetDateTime,
}

/// The computed estimate. The raw fields always hold what was computed, for
/// audit logging; consumer-facing reads go through the `visible_*` accessors,
/// which withhold everything while the estimate is locked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetEstimate {
    pub mode: EstimateMode,
    pub totals: HashMap<EstimateMode, f64>,
    pub confidence: Confidence,
    pub missing_item_count: usize,
    pub locked: bool,
    pub generated_at: OffsetDateTime,
}

impl BudgetEstimate {
    pub fn visible_total(&self, mode: EstimateMode) -> Option<f64> {
        if self.locked {
            return None;
        }
        self.totals.get(&mode).copied()
    }

    pub fn visible_confidence(&self) -> Option<Confidence> {
        (!self.locked).then_some(self.confidence)
    }

    pub fn visible_missing_count(&self) -> Option<usize> {
        (!self.locked).then_some(self.missing_item_count)
    }
}

/// Compute a budget estimate for `mode` over an aggregated shopping list.
///
/// Pure and deterministic: price baselines are supplied by the caller and
/// `generated_at` is passed in rather than sampled here.
///
/// Baseline resolution per item: a baseline carrying the item's exact
/// normalized name beats a category-wide one; among equally specific
/// candidates the most recently updated wins. Items with no baseline at any
/// granularity contribute zero to the total and are counted in
/// `missing_item_count`.
///
/// Locking is derived, never stored: the estimate locks when confidence is
/// low or when fewer than `min_priced_items` items resolved. The computation
/// still runs in full so callers can log confidence and missing counts for
/// locked estimates.
pub fn estimate(
    items: &[ShoppingListItem],
    baselines: &[PriceBaseline],
    mode: EstimateMode,
    config: &EstimatorConfig,
    generated_at: OffsetDateTime,
) -> BudgetEstimate {
    let mut total = 0.0;
    let mut missing = 0usize;

    for item in items {
        match resolve_baseline(item, baselines, mode) {
            Some(baseline) => total += item.quantity * baseline.unit_price,
            None => missing += 1,
        }
    }

    let resolved = items.len() - missing;
    let confidence = classify(missing, items.len(), config);
    let locked = confidence == Confidence::Low || resolved < config.min_priced_items;

    let mut totals = HashMap::new();
    totals.insert(mode, total);

    BudgetEstimate {
        mode,
        totals,
        confidence,
        missing_item_count: missing,
        locked,
        generated_at,
    }
}

fn classify(missing: usize, total: usize, config: &EstimatorConfig) -> Confidence {
    if missing == 0 {
        return Confidence::High;
    }
    if total > 0 && (missing as f64 / total as f64) <= config.medium_missing_ratio {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

fn resolve_baseline<'a>(
    item: &ShoppingListItem,
    baselines: &'a [PriceBaseline],
    mode: EstimateMode,
) -> Option<&'a PriceBaseline> {
    baselines
        .iter()
        .filter(|b| b.mode == mode && matches(b, item))
        .max_by_key(|b| (specificity(b), b.updated_at))
}

fn matches(baseline: &PriceBaseline, item: &ShoppingListItem) -> bool {
    match &baseline.name {
        Some(name) => name.trim().to_lowercase() == item.name,
        None => baseline.category == item.category,
    }
}

fn specificity(baseline: &PriceBaseline) -> u8 {
    u8::from(baseline.name.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_boundaries() {
        let config = EstimatorConfig::default();
        assert_eq!(classify(0, 10, &config), Confidence::High);
        assert_eq!(classify(1, 10, &config), Confidence::Medium);
        assert_eq!(classify(2, 10, &config), Confidence::Medium);
        assert_eq!(classify(3, 10, &config), Confidence::Low);
        // An empty list has nothing missing; absolute-count locking handles it.
        assert_eq!(classify(0, 0, &config), Confidence::High);
    }
}
