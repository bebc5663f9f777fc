mod aggregation;
mod estimate;
mod types;

pub use aggregation::aggregate;
pub use estimate::{estimate, BudgetEstimate, EstimatorConfig, PriceBaseline};
pub use types::{Category, Confidence, EstimateMode, ShoppingListItem};
