use anyhow::Result;
use clap::{Parser, Subcommand};
use platewise::config::Config;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::Sqlite;

/// platewise - meal plan budgeting and exports
#[derive(Parser)]
#[command(name = "platewise")]
#[command(about = "Shopping list budget estimation and meal plan exports", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Insert demo data (a user, a week plan, price baselines)
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    platewise::observability::init_tracing(&config.observability.log_level)?;

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = config;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            ensure_database(&config.database.url).await?;
            platewise::server::serve(config).await
        }
        Commands::Migrate => {
            ensure_database(&config.database.url).await?;
            let pool = SqlitePoolOptions::new()
                .connect(&config.database.url)
                .await?;
            platewise::MIGRATOR.run(&pool).await?;
            tracing::info!("migrations applied");
            Ok(())
        }
        Commands::Seed => {
            ensure_database(&config.database.url).await?;
            let pool = SqlitePoolOptions::new()
                .connect(&config.database.url)
                .await?;
            platewise::MIGRATOR.run(&pool).await?;
            let seeded = platewise::seed::seed_demo_data(&pool).await?;
            let token =
                platewise::middleware::create_jwt(&seeded.user_id, &config.auth.jwt_secret, 86400)?;
            tracing::info!(
                user = seeded.user_id,
                plan = seeded.plan_id,
                "demo data inserted; auth_token cookie value: {token}"
            );
            Ok(())
        }
    }
}

async fn ensure_database(url: &str) -> Result<()> {
    if !Sqlite::database_exists(url).await.unwrap_or(false) {
        Sqlite::create_database(url).await?;
    }
    Ok(())
}
