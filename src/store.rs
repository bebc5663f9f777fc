//! Fetch collaborators for the export pipeline.
//!
//! Everything here maps SQLite rows into the plain structs the core crates
//! consume; no row type crosses this boundary.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use platewise_mealplan::{IngredientLine, MealPlan, MealSlot, PlanItem, Recipe};
use platewise_shopping::{Category, EstimateMode, PriceBaseline, ShoppingListItem};
use sqlx::SqlitePool;
use time::{Date, OffsetDateTime};

use crate::error::AppError;

pub async fn fetch_plan(
    pool: &SqlitePool,
    plan_id: &str,
    user_id: &str,
) -> Result<Option<MealPlan>, AppError> {
    let plan = sqlx::query_as::<_, (String, Date, i64)>(
        "SELECT id, start_date, days FROM meal_plans WHERE id = ?1 AND user_id = ?2",
    )
    .bind(plan_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    let Some((id, start_date, days)) = plan else {
        return Ok(None);
    };
    let days = u16::try_from(days)
        .map_err(|_| AppError::Internal(format!("meal plan {id} has day count {days}")))?;

    let rows = sqlx::query_as::<_, ItemRow>(
        "SELECT id, day, slot, recipe_name, prep_time_minutes, cook_time_minutes, total_time_minutes
         FROM meal_plan_items WHERE plan_id = ?1 ORDER BY day, slot",
    )
    .bind(plan_id)
    .fetch_all(pool)
    .await?;

    let mut ingredients = fetch_ingredients(pool, plan_id).await?;

    let items = rows
        .into_iter()
        .map(|row| {
            let slot = MealSlot::from_str(&row.slot).map_err(|_| {
                AppError::Internal(format!("meal plan item {} has slot '{}'", row.id, row.slot))
            })?;
            let day = u16::try_from(row.day).map_err(|_| {
                AppError::Internal(format!("meal plan item {} has day {}", row.id, row.day))
            })?;
            Ok(PlanItem {
                day,
                slot,
                recipe: Arc::new(Recipe {
                    name: row.recipe_name,
                    prep_time_minutes: row.prep_time_minutes.map(|v| v as u32),
                    cook_time_minutes: row.cook_time_minutes.map(|v| v as u32),
                    total_time_minutes: row.total_time_minutes.map(|v| v as u32),
                    ingredients: ingredients.remove(&row.id).unwrap_or_default(),
                }),
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(Some(MealPlan {
        id,
        start_date,
        days,
        items,
    }))
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: String,
    day: i64,
    slot: String,
    recipe_name: String,
    prep_time_minutes: Option<i64>,
    cook_time_minutes: Option<i64>,
    total_time_minutes: Option<i64>,
}

async fn fetch_ingredients(
    pool: &SqlitePool,
    plan_id: &str,
) -> Result<HashMap<String, Vec<IngredientLine>>, AppError> {
    let rows = sqlx::query_as::<_, (String, String, f64, String, String)>(
        "SELECT i.plan_item_id, i.name, i.quantity, i.unit, i.category
         FROM plan_item_ingredients i
         JOIN meal_plan_items m ON m.id = i.plan_item_id
         WHERE m.plan_id = ?1
         ORDER BY i.plan_item_id, i.position",
    )
    .bind(plan_id)
    .fetch_all(pool)
    .await?;

    let mut grouped: HashMap<String, Vec<IngredientLine>> = HashMap::new();
    for (item_id, name, quantity, unit, category) in rows {
        grouped.entry(item_id).or_default().push(IngredientLine {
            name,
            quantity,
            unit,
            category,
        });
    }
    Ok(grouped)
}

/// The user's persisted checked state, as merge input for the aggregator.
/// Quantities are not stored; identity and the flag are all that matter.
pub async fn fetch_checked_items(
    pool: &SqlitePool,
    plan_id: &str,
) -> Result<Vec<ShoppingListItem>, AppError> {
    let rows = sqlx::query_as::<_, (String, String, String, bool)>(
        "SELECT name, unit, category, checked FROM shopping_list_checks WHERE plan_id = ?1",
    )
    .bind(plan_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(name, unit, category, checked)| ShoppingListItem {
            name,
            quantity: 0.0,
            unit,
            category: Category::parse_lenient(&category),
            checked,
        })
        .collect())
}

pub async fn upsert_checked_item(
    pool: &SqlitePool,
    plan_id: &str,
    name: &str,
    unit: &str,
    category: Category,
    checked: bool,
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO shopping_list_checks (plan_id, name, unit, category, checked)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT (plan_id, name, unit, category) DO UPDATE SET checked = excluded.checked",
    )
    .bind(plan_id)
    .bind(name)
    .bind(unit)
    .bind(category.to_string())
    .bind(checked)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn fetch_price_baselines(
    pool: &SqlitePool,
    mode: EstimateMode,
) -> Result<Vec<PriceBaseline>, AppError> {
    let rows = sqlx::query_as::<_, (Option<String>, String, f64, OffsetDateTime)>(
        "SELECT name, category, unit_price, updated_at FROM price_baselines WHERE mode = ?1",
    )
    .bind(mode.to_string())
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(name, category, unit_price, updated_at)| PriceBaseline {
            name,
            category: Category::parse_lenient(&category),
            mode,
            unit_price,
            updated_at,
        })
        .collect())
}
