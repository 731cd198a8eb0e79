use crate::market::MarketService;
use coin_core::{Clock, CoinError, CoinSnapshot};
use coin_database::{CurrentSnapshotStore, HistoryStore};
use std::sync::Arc;

/// Writes rows into the history log, either from a fresh capture or by copying
/// the current-snapshot store.
pub struct SnapshotRecorder {
    market: Arc<MarketService>,
    current: Arc<dyn CurrentSnapshotStore>,
    history: Arc<dyn HistoryStore>,
    clock: Arc<dyn Clock>,
}

impl SnapshotRecorder {
    pub fn new(
        market: Arc<MarketService>,
        current: Arc<dyn CurrentSnapshotStore>,
        history: Arc<dyn HistoryStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            market,
            current,
            history,
            clock,
        }
    }

    /// One scheduled capture: read the market through the cache, stamp every
    /// row with the capture time and append it to history.
    ///
    /// Returns the number of rows appended.
    pub async fn capture(&self, currency: &str) -> Result<usize, CoinError> {
        let coins = self.market.get_coins(currency).await?;
        let captured_at = self.clock.now();

        let rows: Vec<CoinSnapshot> = coins.iter().map(|c| c.captured_at(captured_at)).collect();
        self.append(&rows).await?;

        Ok(rows.len())
    }

    /// Copy the current-snapshot store into history as-is, timestamps included.
    ///
    /// Returns the number of rows copied; an empty store copies nothing.
    pub async fn save_current_to_history(&self) -> Result<usize, CoinError> {
        let rows = self
            .current
            .find_all()
            .await
            .map_err(|e| CoinError::Persistence(format!("{:#}", e)))?;

        self.append(&rows).await?;
        Ok(rows.len())
    }

    async fn append(&self, rows: &[CoinSnapshot]) -> Result<(), CoinError> {
        self.history
            .append(rows)
            .await
            .map_err(|e| CoinError::Persistence(format!("{:#}", e)))
    }
}
