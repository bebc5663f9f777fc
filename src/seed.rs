//! Demo data so `serve` is usable straight after `migrate`.

use sqlx::SqlitePool;
use time::macros::date;
use time::OffsetDateTime;
use ulid::Ulid;

pub struct SeededData {
    pub user_id: String,
    pub plan_id: String,
}

pub async fn seed_demo_data(pool: &SqlitePool) -> anyhow::Result<SeededData> {
    let user_id = Ulid::new().to_string();
    let plan_id = Ulid::new().to_string();

    sqlx::query("INSERT INTO users (id, email, name) VALUES (?1, ?2, ?3)")
        .bind(&user_id)
        .bind("demo@platewise.app")
        .bind("Demo User")
        .execute(pool)
        .await?;

    sqlx::query("INSERT INTO meal_plans (id, user_id, start_date, days) VALUES (?1, ?2, ?3, ?4)")
        .bind(&plan_id)
        .bind(&user_id)
        .bind(date!(2026 - 08 - 31))
        .bind(7)
        .execute(pool)
        .await?;

    let meals: &[(i64, &str, &str, Option<i64>, Option<i64>)] = &[
        (0, "breakfast", "Overnight Oats", Some(10), None),
        (0, "dinner", "Lentil Stew", Some(15), Some(30)),
        (1, "breakfast", "Scrambled Eggs", Some(5), Some(5)),
        (1, "dinner", "Chicken Stir Fry", Some(20), Some(15)),
    ];

    for &(day, slot, recipe, prep, cook) in meals {
        let item_id = Ulid::new().to_string();
        sqlx::query(
            "INSERT INTO meal_plan_items
                (id, plan_id, day, slot, recipe_name, prep_time_minutes, cook_time_minutes, total_time_minutes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, NULL)",
        )
        .bind(&item_id)
        .bind(&plan_id)
        .bind(day)
        .bind(slot)
        .bind(recipe)
        .bind(prep)
        .bind(cook)
        .execute(pool)
        .await?;

        for (position, (name, quantity, unit, category)) in
            demo_ingredients(recipe).into_iter().enumerate()
        {
            sqlx::query(
                "INSERT INTO plan_item_ingredients
                    (id, plan_item_id, position, name, quantity, unit, category)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .bind(Ulid::new().to_string())
            .bind(&item_id)
            .bind(position as i64)
            .bind(name)
            .bind(quantity)
            .bind(unit)
            .bind(category)
            .execute(pool)
            .await?;
        }
    }

    let baselines: &[(Option<&str>, &str, f64)] = &[
        (None, "vegetables", 0.9),
        (None, "protein", 4.5),
        (None, "dairy", 1.2),
        (None, "grains", 0.4),
        (None, "pantry", 0.6),
        (Some("chicken breast"), "protein", 6.0),
    ];

    for &(name, category, unit_price) in baselines {
        sqlx::query(
            "INSERT INTO price_baselines (id, name, category, mode, unit_price, updated_at)
             VALUES (?1, ?2, ?3, 'standard', ?4, ?5)",
        )
        .bind(Ulid::new().to_string())
        .bind(name)
        .bind(category)
        .bind(unit_price)
        .bind(OffsetDateTime::now_utc())
        .execute(pool)
        .await?;
    }

    Ok(SeededData { user_id, plan_id })
}

fn demo_ingredients(recipe: &str) -> Vec<(&'static str, f64, &'static str, &'static str)> {
    match recipe {
        "Overnight Oats" => vec![
            ("rolled oats", 80.0, "g", "grains"),
            ("milk", 0.25, "l", "dairy"),
            ("blueberries", 50.0, "g", "fruits"),
        ],
        "Lentil Stew" => vec![
            ("red lentils", 200.0, "g", "pantry"),
            ("onion", 1.0, "pc", "vegetables"),
            ("carrot", 2.0, "pc", "vegetables"),
        ],
        "Scrambled Eggs" => vec![
            ("eggs", 3.0, "pc", "protein"),
            ("butter", 10.0, "g", "dairy"),
        ],
        "Chicken Stir Fry" => vec![
            ("chicken breast", 300.0, "g", "protein"),
            ("onion", 1.0, "pc", "vegetables"),
            ("rice", 150.0, "g", "grains"),
        ],
        _ => vec![],
    }
}
