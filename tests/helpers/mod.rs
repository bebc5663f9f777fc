use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use time::macros::datetime;
use time::Date;
use tower::ServiceExt;
use ulid::Ulid;

pub const JWT_SECRET: &str = "test-secret-key-at-least-32-bytes!!";

pub async fn setup_app() -> (Router, SqlitePool) {
    // A single connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    platewise::MIGRATOR.run(&pool).await.unwrap();
    let app = platewise::create_app(pool.clone(), JWT_SECRET.to_string());
    (app, pool)
}

pub async fn insert_user(pool: &SqlitePool, name: Option<&str>) -> String {
    let user_id = Ulid::new().to_string();
    sqlx::query("INSERT INTO users (id, email, name) VALUES (?1, ?2, ?3)")
        .bind(&user_id)
        .bind(format!("{user_id}@test.local"))
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
    user_id
}

pub async fn insert_plan(pool: &SqlitePool, user_id: &str, start_date: Date, days: u16) -> String {
    let plan_id = Ulid::new().to_string();
    sqlx::query("INSERT INTO meal_plans (id, user_id, start_date, days) VALUES (?1, ?2, ?3, ?4)")
        .bind(&plan_id)
        .bind(user_id)
        .bind(start_date)
        .bind(i64::from(days))
        .execute(pool)
        .await
        .unwrap();
    plan_id
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_plan_item(
    pool: &SqlitePool,
    plan_id: &str,
    day: u16,
    slot: &str,
    recipe_name: &str,
    prep: Option<i64>,
    cook: Option<i64>,
    ingredients: &[(&str, f64, &str, &str)],
) -> String {
    let item_id = Ulid::new().to_string();
    sqlx::query(
        "INSERT INTO meal_plan_items
            (id, plan_id, day, slot, recipe_name, prep_time_minutes, cook_time_minutes, total_time_minutes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, NULL)",
    )
    .bind(&item_id)
    .bind(plan_id)
    .bind(i64::from(day))
    .bind(slot)
    .bind(recipe_name)
    .bind(prep)
    .bind(cook)
    .execute(pool)
    .await
    .unwrap();

    for (position, (name, quantity, unit, category)) in ingredients.iter().copied().enumerate() {
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
        .await
        .unwrap();
    }

    item_id
}

pub async fn insert_category_baseline(pool: &SqlitePool, category: &str, unit_price: f64) {
    sqlx::query(
        "INSERT INTO price_baselines (id, name, category, mode, unit_price, updated_at)
         VALUES (?1, NULL, ?2, 'standard', ?3, ?4)",
    )
    .bind(Ulid::new().to_string())
    .bind(category)
    .bind(unit_price)
    .bind(datetime!(2024-01-01 00:00 UTC))
    .execute(pool)
    .await
    .unwrap();
}

pub fn auth_cookie(user_id: &str) -> String {
    let token = platewise::middleware::create_jwt(user_id, JWT_SECRET, 3600).unwrap();
    format!("auth_token={token}")
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(app: &Router, uri: &str, cookie: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("cookie", cookie)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
