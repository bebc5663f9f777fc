use sqlx::sqlite::SqlitePoolOptions;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::routes::{router, AppState};

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let pool = SqlitePoolOptions::new()
        .connect(&config.database.url)
        .await?;

    crate::MIGRATOR.run(&pool).await?;

    let state = AppState {
        pool,
        jwt_secret: config.auth.jwt_secret.clone(),
        estimate: config.estimate.clone(),
    };

    let app = router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr, "platewise listening");

    axum::serve(listener, app).await?;
    Ok(())
}
