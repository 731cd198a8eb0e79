use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Tables owned by coin-dash
pub const TABLES: &[&str] = &["current_coins", "history_coins"];

/// Database statistics
#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseStats {
    pub tables: Vec<TableStats>,
    pub tracked_coins: Vec<CoinCoverage>,
    pub total_size: String,
    pub fetched_at: DateTime<Utc>,
}

/// Statistics for a single table
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct TableStats {
    pub table_name: String,
    pub row_count: i64,
    pub total_size: String,
    pub min_ts: Option<DateTime<Utc>>,
    pub max_ts: Option<DateTime<Utc>>,
}

/// How much history exists for one coin
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct CoinCoverage {
    pub coin_id: String,
    pub snapshots: i64,
    pub first_ts: Option<DateTime<Utc>>,
    pub latest_ts: Option<DateTime<Utc>>,
}

/// Get comprehensive database statistics
pub async fn get_database_stats(pool: &PgPool) -> Result<DatabaseStats> {
    let mut tables = Vec::with_capacity(TABLES.len());
    for table in TABLES {
        tables.push(get_table_stats(pool, table).await?);
    }

    let tracked_coins = get_coin_coverage(pool).await?;
    let total_size = get_total_database_size(pool).await?;

    Ok(DatabaseStats {
        tables,
        tracked_coins,
        total_size,
        fetched_at: Utc::now(),
    })
}

async fn get_table_stats(pool: &PgPool, table: &str) -> Result<TableStats> {
    let query = format!(
        r#"
        SELECT
            '{table}' AS table_name,
            COUNT(*) AS row_count,
            pg_size_pretty(pg_total_relation_size('{table}')) AS total_size,
            MIN(ts) AS min_ts,
            MAX(ts) AS max_ts
        FROM {table}
        "#,
        table = table
    );

    sqlx::query_as::<_, TableStats>(&query)
        .fetch_one(pool)
        .await
        .with_context(|| format!("Failed to fetch statistics for {}", table))
}

async fn get_coin_coverage(pool: &PgPool) -> Result<Vec<CoinCoverage>> {
    let coverage = sqlx::query_as::<_, CoinCoverage>(
        r#"
        SELECT
            coin_id,
            COUNT(*) AS snapshots,
            MIN(ts) AS first_ts,
            MAX(ts) AS latest_ts
        FROM history_coins
        GROUP BY coin_id
        ORDER BY snapshots DESC, coin_id
        "#,
    )
    .fetch_all(pool)
    .await
    .context("Failed to fetch per-coin history coverage")?;

    Ok(coverage)
}

/// Get total database size
async fn get_total_database_size(pool: &PgPool) -> Result<String> {
    let size: String = sqlx::query_scalar(
        r#"
        SELECT pg_size_pretty(pg_database_size(current_database()))
        "#,
    )
    .fetch_one(pool)
    .await
    .context("Failed to fetch database size")?;

    Ok(size)
}
