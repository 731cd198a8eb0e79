use async_trait::async_trait;
use chrono::{DateTime, Utc};
use coin_core::CoinSnapshot;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

/// Row count and time range of one store, for health and stats endpoints.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    pub row_count: i64,
    pub distinct_coins: i64,
    pub oldest: Option<DateTime<Utc>>,
    pub newest: Option<DateTime<Utc>>,
}

/// Holds the most recently fetched top-N set.
#[async_trait]
pub trait CurrentSnapshotStore: Send + Sync {
    /// Replace every stored row with `snapshots`.
    ///
    /// Logically a delete-all followed by an insert-all. Implementations must
    /// apply it as one unit so readers never observe a partial set.
    async fn replace_all(&self, snapshots: &[CoinSnapshot]) -> anyhow::Result<()>;

    /// All rows of the last replacement, in no particular order.
    async fn find_all(&self) -> anyhow::Result<Vec<CoinSnapshot>>;

    async fn summary(&self) -> anyhow::Result<StoreSummary>;
}

/// Append-only log of per-coin snapshots.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Insert `snapshots`. Existing rows are never touched.
    async fn append(&self, snapshots: &[CoinSnapshot]) -> anyhow::Result<()>;

    /// Rows for `coin_id` sorted by ascending timestamp, optionally limited to
    /// one currency. Unknown ids yield an empty vec.
    async fn query_by_coin(
        &self,
        coin_id: &str,
        currency: Option<&str>,
    ) -> anyhow::Result<Vec<CoinSnapshot>>;

    async fn summary(&self) -> anyhow::Result<StoreSummary>;
}

#[derive(sqlx::FromRow)]
struct SnapshotRow {
    coin_id: String,
    name: String,
    symbol: String,
    price: Decimal,
    market_cap: Decimal,
    percent_change_24h: Option<Decimal>,
    currency: String,
    ts: DateTime<Utc>,
}

impl From<SnapshotRow> for CoinSnapshot {
    fn from(row: SnapshotRow) -> Self {
        CoinSnapshot {
            coin_id: row.coin_id,
            name: row.name,
            symbol: row.symbol,
            price: row.price,
            market_cap: row.market_cap,
            percent_change_24h: row.percent_change_24h,
            currency: row.currency,
            timestamp: row.ts,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    row_count: i64,
    distinct_coins: i64,
    oldest: Option<DateTime<Utc>>,
    newest: Option<DateTime<Utc>>,
}

/// PostgreSQL implementation of both snapshot stores
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_rows<'e, E>(
        executor: E,
        table: &str,
        snapshots: &[CoinSnapshot],
    ) -> anyhow::Result<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        let mut builder = sqlx::QueryBuilder::<sqlx::Postgres>::new(format!(
            "INSERT INTO {} (coin_id, name, symbol, price, market_cap, percent_change_24h, currency, ts) ",
            table
        ));

        builder.push_values(snapshots, |mut row, s| {
            row.push_bind(s.coin_id.clone())
                .push_bind(s.name.clone())
                .push_bind(s.symbol.clone())
                .push_bind(s.price)
                .push_bind(s.market_cap)
                .push_bind(s.percent_change_24h)
                .push_bind(s.currency.clone())
                .push_bind(s.timestamp);
        });

        builder.build().execute(executor).await?;
        Ok(())
    }

    async fn summarize(&self, table: &str) -> anyhow::Result<StoreSummary> {
        let query = format!(
            r#"
            SELECT COUNT(*) AS row_count,
                   COUNT(DISTINCT coin_id) AS distinct_coins,
                   MIN(ts) AS oldest,
                   MAX(ts) AS newest
            FROM {}
            "#,
            table
        );

        let row = sqlx::query_as::<_, SummaryRow>(&query)
            .fetch_one(&self.pool)
            .await?;

        Ok(StoreSummary {
            row_count: row.row_count,
            distinct_coins: row.distinct_coins,
            oldest: row.oldest,
            newest: row.newest,
        })
    }
}

#[async_trait]
impl CurrentSnapshotStore for PostgresRepository {
    async fn replace_all(&self, snapshots: &[CoinSnapshot]) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM current_coins")
            .execute(&mut *tx)
            .await?;

        if !snapshots.is_empty() {
            Self::insert_rows(&mut *tx, "current_coins", snapshots).await?;
        }

        tx.commit().await?;
        tracing::debug!("✓ Replaced current_coins with {} rows", snapshots.len());
        Ok(())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<CoinSnapshot>> {
        let rows = sqlx::query_as::<_, SnapshotRow>(
            r#"
            SELECT coin_id, name, symbol, price, market_cap, percent_change_24h, currency, ts
            FROM current_coins
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CoinSnapshot::from).collect())
    }

    async fn summary(&self) -> anyhow::Result<StoreSummary> {
        self.summarize("current_coins").await
    }
}

#[async_trait]
impl HistoryStore for PostgresRepository {
    async fn append(&self, snapshots: &[CoinSnapshot]) -> anyhow::Result<()> {
        if snapshots.is_empty() {
            return Ok(());
        }

        Self::insert_rows(&self.pool, "history_coins", snapshots).await?;
        tracing::info!("✓ Appended {} rows to history_coins", snapshots.len());
        Ok(())
    }

    async fn query_by_coin(
        &self,
        coin_id: &str,
        currency: Option<&str>,
    ) -> anyhow::Result<Vec<CoinSnapshot>> {
        let rows = sqlx::query_as::<_, SnapshotRow>(
            r#"
            SELECT coin_id, name, symbol, price, market_cap, percent_change_24h, currency, ts
            FROM history_coins
            WHERE coin_id = $1 AND ($2::TEXT IS NULL OR currency = $2)
            ORDER BY ts ASC, id ASC
            "#,
        )
        .bind(coin_id)
        .bind(currency)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CoinSnapshot::from).collect())
    }

    async fn summary(&self) -> anyhow::Result<StoreSummary> {
        self.summarize("history_coins").await
    }
}
