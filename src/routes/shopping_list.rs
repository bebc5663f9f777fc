use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Form};
use platewise_shopping::Category;
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::Auth;
use crate::routes::export::validate_plan_id;
use crate::routes::AppState;
use crate::store;

#[derive(Debug, Deserialize)]
pub struct ToggleInput {
    pub name: String,
    pub unit: String,
    pub category: String,
    pub checked: bool,
}

/// POST /mealplans/{id}/shopping-list/toggle
///
/// Persists a checked/unchecked flag under the aggregator's normalized
/// identity so it survives list regeneration.
pub async fn toggle_item(
    Extension(auth): Extension<Auth>,
    State(app): State<AppState>,
    Path(plan_id): Path<String>,
    Form(input): Form<ToggleInput>,
) -> Result<StatusCode, AppError> {
    validate_plan_id(&plan_id)?;

    let name = input.name.trim().to_lowercase();
    if name.is_empty() {
        return Err(AppError::Validation("item name must not be empty".to_string()));
    }
    let unit = input.unit.trim().to_lowercase();
    let category = Category::parse_lenient(&input.category);

    let plan = store::fetch_plan(&app.pool, &plan_id, &auth.user_id).await?;
    if plan.is_none() {
        return Err(AppError::NotFound("meal plan"));
    }

    store::upsert_checked_item(&app.pool, &plan_id, &name, &unit, category, input.checked).await?;

    tracing::debug!(
        plan = plan_id,
        item = name,
        checked = input.checked,
        "shopping list item toggled"
    );

    Ok(StatusCode::NO_CONTENT)
}
