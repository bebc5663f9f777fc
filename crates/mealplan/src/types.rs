use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::Date;

/// One raw ingredient line as it appears on a recipe.
///
/// `category` is kept as free text here; the shopping crate maps it onto its
/// fixed category set during aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub prep_time_minutes: Option<u32>,
    pub cook_time_minutes: Option<u32>,
    /// Resolved by [`crate::normalize`]; may be absent on freshly loaded plans.
    pub total_time_minutes: Option<u32>,
    pub ingredients: Vec<IngredientLine>,
}

/// Meal slot within a day. Declaration order is display order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanItem {
    /// Zero-based offset from the plan's start date.
    pub day: u16,
    pub slot: MealSlot,
    pub recipe: Arc<Recipe>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: String,
    pub start_date: Date,
    pub days: u16,
    pub items: Vec<PlanItem>,
}
