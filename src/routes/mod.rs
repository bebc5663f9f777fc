use axum::middleware as axum_middleware;
use axum::routing::{get, post};
use axum::Router;
use sqlx::SqlitePool;

use crate::config::EstimateConfig;
use crate::middleware::auth_middleware;

mod export;
mod health;
mod shopping_list;

pub use export::{export_plan_pdf, export_shopping_list_csv};
pub use health::{health, ready};
pub use shopping_list::toggle_item;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub jwt_secret: String,
    pub estimate: EstimateConfig,
}

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/mealplans/{id}/export/pdf", get(export_plan_pdf))
        .route(
            "/mealplans/{id}/shopping-list/export/csv",
            get(export_shopping_list_csv),
        )
        .route("/mealplans/{id}/shopping-list/toggle", post(toggle_item))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .merge(protected)
        .with_state(state)
}
