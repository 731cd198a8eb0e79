use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;

/// Connection pool settings for the snapshot database
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// Apply pending migrations right after connecting
    pub migrate_on_connect: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(10),
            migrate_on_connect: true,
        }
    }

    pub fn without_migrations(mut self) -> Self {
        self.migrate_on_connect = false;
        self
    }
}

/// Open a pool, verify the server answers, and bring the schema up to date.
///
/// Returns only once the database is usable, so callers can start background
/// writers right after.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let connect_options =
        PgConnectOptions::from_str(&config.url).context("Failed to parse database URL")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(connect_options)
        .await
        .context("Failed to create database pool")?;

    health_check(&pool).await?;

    if config.migrate_on_connect {
        run_migrations(&pool).await?;
    }

    tracing::info!(
        "Database ready (max {} connections)",
        config.max_connections
    );

    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// Check if the database is accessible
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .context("Database health check failed")?;

    Ok(())
}
