use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Shopping list category. Declaration order is the fixed display order
/// exports sort by.
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
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vegetables,
    Fruits,
    Protein,
    Dairy,
    Grains,
    Pantry,
    Other,
}

impl Category {
    /// Maps free-text recipe categories onto the fixed set; anything
    /// unrecognized lands in `Other`.
    pub fn parse_lenient(raw: &str) -> Self {
        Category::from_str(raw.trim().to_lowercase().as_str()).unwrap_or(Category::Other)
    }
}

/// A named pricing strategy for computing a shopping list total.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EstimateMode {
    #[default]
    Standard,
}

impl EstimateMode {
    pub fn all() -> impl Iterator<Item = EstimateMode> {
        EstimateMode::iter()
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// One deduplicated shopping list line. Identity is
/// (name, unit, category) after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: Category,
    pub checked: bool,
}
