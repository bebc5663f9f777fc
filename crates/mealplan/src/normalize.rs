use std::sync::Arc;

use crate::types::{MealPlan, PlanItem, Recipe};

/// Resolve derived plan fields ahead of estimation and export.
///
/// Every recipe leaves here with `total_time_minutes` populated when it can
/// be: the stored value wins, otherwise prep + cook (a missing component
/// counts as zero), otherwise it stays `None` when both components are
/// absent.
///
/// The input is not mutated. Recipes that need no change keep their `Arc`,
/// so callers can detect a no-op with `Arc::ptr_eq` and normalizing an
/// already-normalized plan changes nothing. Absent plans pass through as
/// `None`.
pub fn normalize(plan: Option<MealPlan>) -> Option<MealPlan> {
    let MealPlan {
        id,
        start_date,
        days,
        items,
    } = plan?;

    let items = items
        .into_iter()
        .map(|item| PlanItem {
            recipe: resolve_total_time(item.recipe),
            day: item.day,
            slot: item.slot,
        })
        .collect();

    Some(MealPlan {
        id,
        start_date,
        days,
        items,
    })
}

fn resolve_total_time(recipe: Arc<Recipe>) -> Arc<Recipe> {
    if recipe.total_time_minutes.is_some() {
        return recipe;
    }

    match (recipe.prep_time_minutes, recipe.cook_time_minutes) {
        (None, None) => recipe,
        (prep, cook) => Arc::new(Recipe {
            total_time_minutes: Some(prep.unwrap_or(0) + cook.unwrap_or(0)),
            ..(*recipe).clone()
        }),
    }
}
