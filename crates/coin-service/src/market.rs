use coin_core::{normalize_currency, Clock, CoinError, CoinSnapshot, MarketDataSource};
use coin_database::CurrentSnapshotStore;
use coin_upstream::PriceCache;
use std::sync::Arc;

/// Read path for the top-coins table.
///
/// Serves from the price cache while it is fresh. On a miss it fetches from the
/// upstream, replaces the current-snapshot store, then fills the cache. A failed
/// fetch or store write leaves both the store and the cache untouched by this
/// call.
pub struct MarketService {
    source: Arc<dyn MarketDataSource>,
    cache: Arc<PriceCache>,
    current: Arc<dyn CurrentSnapshotStore>,
    clock: Arc<dyn Clock>,
}

impl MarketService {
    pub fn new(
        source: Arc<dyn MarketDataSource>,
        cache: Arc<PriceCache>,
        current: Arc<dyn CurrentSnapshotStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            cache,
            current,
            clock,
        }
    }

    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }

    /// Top coins priced in `currency`.
    pub async fn get_coins(&self, currency: &str) -> Result<Vec<CoinSnapshot>, CoinError> {
        let currency = normalize_currency(currency)?;
        let now = self.clock.now();

        if let Some(cached) = self.cache.get(&currency, now) {
            tracing::debug!("Serving {} coins in {} from cache", cached.len(), currency);
            return Ok(cached);
        }

        tracing::info!(
            "Cache miss for {}, fetching from {}",
            currency,
            self.source.get_name()
        );

        let coins = self.source.fetch_markets(&currency).await.map_err(|e| {
            CoinError::UpstreamUnavailable(format!("{}: {:#}", self.source.get_name(), e))
        })?;

        self.current
            .replace_all(&coins)
            .await
            .map_err(|e| CoinError::Persistence(format!("{:#}", e)))?;

        self.cache.put(&currency, coins.clone(), now);

        Ok(coins)
    }
}
