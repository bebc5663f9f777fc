pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod seed;
pub mod server;
pub mod store;

pub use routes::AppState;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Build the router against an existing pool. Integration tests use this to
/// exercise the full stack without binding a socket.
pub fn create_app(pool: sqlx::SqlitePool, jwt_secret: String) -> axum::Router {
    let state = AppState {
        pool,
        jwt_secret,
        estimate: config::EstimateConfig::default(),
    };
    routes::router(state)
}
