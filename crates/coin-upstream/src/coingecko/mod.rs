pub mod client;
pub mod conversions;
pub mod types;

pub use client::{CoinGeckoClient, CoinGeckoConfig};
