use coin_core::{normalize_currency, CoinError, CoinHistory};
use coin_database::HistoryStore;
use std::sync::Arc;

/// Rebuilds a coin's price history from the snapshot log.
pub struct HistoryService {
    history: Arc<dyn HistoryStore>,
}

impl HistoryService {
    pub fn new(history: Arc<dyn HistoryStore>) -> Self {
        Self { history }
    }

    /// Ordered history of `coin_id` plus its latest record.
    ///
    /// Fails with `NotFound` when no rows exist for the coin (in `currency`,
    /// when one is given).
    pub async fn get_history(
        &self,
        coin_id: &str,
        currency: Option<&str>,
    ) -> Result<CoinHistory, CoinError> {
        let currency = currency.map(normalize_currency).transpose()?;

        let rows = self
            .history
            .query_by_coin(coin_id, currency.as_deref())
            .await
            .map_err(|e| CoinError::Persistence(format!("{:#}", e)))?;

        tracing::debug!("Loaded {} history rows for {}", rows.len(), coin_id);

        CoinHistory::from_ordered(rows)
            .ok_or_else(|| CoinError::NotFound(format!("Coin {} not found", coin_id)))
    }
}
