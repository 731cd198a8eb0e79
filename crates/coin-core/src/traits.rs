use crate::types::CoinSnapshot;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// MarketDataSource is implemented by every upstream market-data provider.
/// It returns the top coins by market capitalisation in a given currency.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Name of the provider, used in logs.
    fn get_name(&self) -> &str;

    /// Fetches the top coins ordered by descending market cap, priced in
    /// `currency` (lowercase ISO code such as "usd").
    ///
    /// A failed request must not yield partial data.
    async fn fetch_markets(&self, currency: &str) -> anyhow::Result<Vec<CoinSnapshot>>;
}

/// Source of the current time. Owners inject it so TTL and capture-time logic
/// can be driven deterministically.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
