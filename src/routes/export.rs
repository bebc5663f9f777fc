use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Response, StatusCode};
use axum::Extension;
use platewise_export::{export_filename, render_plan_pdf, render_shopping_list_csv};
use platewise_mealplan::{normalize, MealPlan};
use platewise_shopping::{aggregate, estimate, BudgetEstimate, ShoppingListItem};
use time::OffsetDateTime;

use crate::error::AppError;
use crate::middleware::Auth;
use crate::routes::AppState;
use crate::store;

/// GET /mealplans/{id}/export/pdf
pub async fn export_plan_pdf(
    Extension(auth): Extension<Auth>,
    State(app): State<AppState>,
    Path(plan_id): Path<String>,
) -> Result<Response<Body>, AppError> {
    validate_plan_id(&plan_id)?;

    let plan = fetch_normalized_plan(&app, &plan_id, &auth.user_id).await?;
    let (_, budget) = shopping_list_with_estimate(&app, &plan).await?;

    let bytes = render_plan_pdf(&plan, &budget)?;
    let filename = export_filename(plan.start_date, plan.days, auth.name.as_deref(), "pdf");

    attachment(&filename, "application/pdf", bytes)
}

/// GET /mealplans/{id}/shopping-list/export/csv
pub async fn export_shopping_list_csv(
    Extension(auth): Extension<Auth>,
    State(app): State<AppState>,
    Path(plan_id): Path<String>,
) -> Result<Response<Body>, AppError> {
    validate_plan_id(&plan_id)?;

    let plan = fetch_normalized_plan(&app, &plan_id, &auth.user_id).await?;
    let (items, budget) = shopping_list_with_estimate(&app, &plan).await?;

    let bytes = render_shopping_list_csv(&items, &budget)?;
    let filename = export_filename(plan.start_date, plan.days, auth.name.as_deref(), "csv");

    attachment(&filename, "text/csv; charset=utf-8", bytes)
}

async fn fetch_normalized_plan(
    app: &AppState,
    plan_id: &str,
    user_id: &str,
) -> Result<MealPlan, AppError> {
    let plan = store::fetch_plan(&app.pool, plan_id, user_id).await?;
    normalize(plan).ok_or(AppError::NotFound("meal plan"))
}

async fn shopping_list_with_estimate(
    app: &AppState,
    plan: &MealPlan,
) -> Result<(Vec<ShoppingListItem>, BudgetEstimate), AppError> {
    let previous = store::fetch_checked_items(&app.pool, &plan.id).await?;
    let items = aggregate(&plan.items, &previous);

    let config = app.estimate.estimator();
    let mode = config.default_mode;
    let baselines = store::fetch_price_baselines(&app.pool, mode).await?;
    let budget = estimate(
        &items,
        &baselines,
        mode,
        &config,
        OffsetDateTime::now_utc(),
    );

    // Audit trail: the raw computation is logged even when the estimate is
    // locked and withheld from the export.
    tracing::info!(
        plan = plan.id,
        mode = %budget.mode,
        confidence = %budget.confidence,
        missing_items = budget.missing_item_count,
        locked = budget.locked,
        "budget estimate computed"
    );

    Ok((items, budget))
}

pub(super) fn validate_plan_id(plan_id: &str) -> Result<(), AppError> {
    let valid = !plan_id.is_empty()
        && plan_id.len() <= 64
        && plan_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AppError::Validation("malformed plan id".to_string()))
    }
}

fn attachment(
    filename: &str,
    content_type: &str,
    bytes: Vec<u8>,
) -> Result<Response<Body>, AppError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .header(header::CACHE_CONTROL, "no-store")
        .body(Body::from(bytes))
        .map_err(|err| AppError::Internal(format!("response build failed: {err}")))
}
