mod normalize;
mod types;

pub use normalize::normalize;
pub use types::{IngredientLine, MealPlan, MealSlot, PlanItem, Recipe};
