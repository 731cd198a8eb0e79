// Market-data providers implementing the MarketDataSource trait, plus the
// in-memory price cache that fronts them.

pub mod cache;
pub mod coingecko;

// Re-export the core trait
pub use coin_core::MarketDataSource;

pub use cache::{PriceCache, DEFAULT_TTL};
pub use coingecko::{CoinGeckoClient, CoinGeckoConfig};
