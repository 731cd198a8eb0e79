use anyhow::{Context, Result};
use coin_core::MarketDataSource;
use coin_database::{
    CurrentSnapshotStore, DatabaseConfig, HistoryStore, MemoryRepository, PostgresRepository,
};
use coin_upstream::{CoinGeckoClient, CoinGeckoConfig, PriceCache};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::cli::UpstreamArgs;

/// Where snapshots are kept for the lifetime of a command
pub struct Storage {
    pub pool: Option<PgPool>,
    pub current: Arc<dyn CurrentSnapshotStore>,
    pub history: Arc<dyn HistoryStore>,
}

impl Storage {
    pub fn in_memory() -> Self {
        tracing::warn!("Using in-memory storage; history is lost on exit");
        let repository = Arc::new(MemoryRepository::new());

        Self {
            pool: None,
            current: repository.clone(),
            history: repository,
        }
    }

    /// Connect to Postgres and bring the schema up to date
    pub async fn postgres(database_url: &str) -> Result<Self> {
        tracing::info!("Connecting to database: {}", mask_password(database_url));

        let pool = coin_database::connect(&DatabaseConfig::new(database_url)).await?;
        let repository = Arc::new(PostgresRepository::new(pool.clone()));

        tracing::info!("✓ Database connection established");

        Ok(Self {
            pool: Some(pool),
            current: repository.clone(),
            history: repository,
        })
    }
}

pub fn require_database_url(database_url: Option<String>) -> Result<String> {
    database_url.ok_or_else(|| {
        anyhow::anyhow!(
            "DATABASE_URL is required. Set via --database-url flag or DATABASE_URL environment variable"
        )
    })
}

pub fn build_source(args: &UpstreamArgs) -> Result<Arc<dyn MarketDataSource>> {
    let config = CoinGeckoConfig::default()
        .with_base_url(args.coingecko_base_url.clone())
        .with_api_key(args.coingecko_api_key.clone())
        .with_timeout(Duration::from_secs(args.upstream_timeout_secs));

    let client = CoinGeckoClient::new(config).context("Failed to build CoinGecko client")?;
    Ok(Arc::new(client))
}

pub fn build_cache(args: &UpstreamArgs) -> Arc<PriceCache> {
    Arc::new(PriceCache::new(Duration::from_secs(args.cache_ttl_secs)))
}

/// Mask password in database URL for logging
pub fn mask_password(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(mut parsed) if parsed.password().is_some() => {
            let _ = parsed.set_password(Some("***"));
            parsed.to_string()
        }
        _ => url.to_string(),
    }
}
