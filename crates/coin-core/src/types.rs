use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A point-in-time record of one coin's market data in one currency.
///
/// Used for both the current table and the history table. Numeric fields are
/// expressed in `currency` and are never converted between currencies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoinSnapshot {
    pub coin_id: String,
    pub name: String,
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub market_cap: Decimal,
    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub percent_change_24h: Option<Decimal>,
    pub currency: String,
    pub timestamp: DateTime<Utc>,
}

impl CoinSnapshot {
    /// Returns a copy of this snapshot stamped with a different capture time.
    pub fn captured_at(&self, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            ..self.clone()
        }
    }
}

/// Ordered price history of one coin together with its most recent record.
///
/// `latest` is always the last element of `history`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoinHistory {
    pub history: Vec<CoinSnapshot>,
    #[serde(rename = "coinDetails")]
    pub latest: CoinSnapshot,
}

impl CoinHistory {
    /// Builds a history from rows already sorted by ascending timestamp.
    /// Returns `None` when there are no rows.
    pub fn from_ordered(history: Vec<CoinSnapshot>) -> Option<Self> {
        let latest = history.last()?.clone();
        Some(Self { history, latest })
    }
}
