use crate::repository::{CurrentSnapshotStore, HistoryStore, StoreSummary};
use async_trait::async_trait;
use coin_core::CoinSnapshot;
use parking_lot::RwLock;
use std::collections::HashSet;

/// Process-local implementation of both snapshot stores.
///
/// Used when the server runs without Postgres and in tests. Replacement of the
/// current set happens under a single write lock, so it is atomic for readers.
/// Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    current: RwLock<Vec<CoinSnapshot>>,
    history: RwLock<Vec<CoinSnapshot>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn summarize(rows: &[CoinSnapshot]) -> StoreSummary {
    let coins: HashSet<&str> = rows.iter().map(|s| s.coin_id.as_str()).collect();

    StoreSummary {
        row_count: rows.len() as i64,
        distinct_coins: coins.len() as i64,
        oldest: rows.iter().map(|s| s.timestamp).min(),
        newest: rows.iter().map(|s| s.timestamp).max(),
    }
}

#[async_trait]
impl CurrentSnapshotStore for MemoryRepository {
    async fn replace_all(&self, snapshots: &[CoinSnapshot]) -> anyhow::Result<()> {
        *self.current.write() = snapshots.to_vec();
        Ok(())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<CoinSnapshot>> {
        Ok(self.current.read().clone())
    }

    async fn summary(&self) -> anyhow::Result<StoreSummary> {
        Ok(summarize(&self.current.read()))
    }
}

#[async_trait]
impl HistoryStore for MemoryRepository {
    async fn append(&self, snapshots: &[CoinSnapshot]) -> anyhow::Result<()> {
        self.history.write().extend_from_slice(snapshots);
        Ok(())
    }

    async fn query_by_coin(
        &self,
        coin_id: &str,
        currency: Option<&str>,
    ) -> anyhow::Result<Vec<CoinSnapshot>> {
        let mut rows: Vec<CoinSnapshot> = self
            .history
            .read()
            .iter()
            .filter(|s| s.coin_id == coin_id)
            .filter(|s| currency.map_or(true, |c| s.currency == c))
            .cloned()
            .collect();

        // Stable sort: rows sharing a timestamp keep insertion order
        rows.sort_by_key(|s| s.timestamp);
        Ok(rows)
    }

    async fn summary(&self) -> anyhow::Result<StoreSummary> {
        Ok(summarize(&self.history.read()))
    }
}
