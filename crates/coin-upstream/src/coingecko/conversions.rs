use chrono::{DateTime, Utc};
use coin_core::CoinSnapshot;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use super::types::MarketEntry;

fn to_decimal(value: Option<f64>) -> Option<Decimal> {
    value.and_then(Decimal::from_f64)
}

/// Convert a CoinGecko market entry to a core CoinSnapshot.
///
/// Missing price or market cap become zero. Entries without `last_updated`
/// are stamped with `fetched_at`.
pub fn to_snapshot(entry: &MarketEntry, currency: &str, fetched_at: DateTime<Utc>) -> CoinSnapshot {
    CoinSnapshot {
        coin_id: entry.id.clone(),
        name: entry.name.clone(),
        symbol: entry.symbol.clone(),
        price: to_decimal(entry.current_price).unwrap_or(Decimal::ZERO),
        market_cap: to_decimal(entry.market_cap).unwrap_or(Decimal::ZERO),
        percent_change_24h: to_decimal(entry.price_change_percentage_24h),
        currency: currency.to_string(),
        timestamp: entry.last_updated.unwrap_or(fetched_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_snapshot_maps_fields() {
        let updated = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let entry = MarketEntry {
            id: "ethereum".to_string(),
            symbol: "eth".to_string(),
            name: "Ethereum".to_string(),
            current_price: Some(3100.25),
            market_cap: Some(372_000_000_000.0),
            price_change_percentage_24h: Some(2.5),
            last_updated: Some(updated),
        };

        let snapshot = to_snapshot(&entry, "usd", Utc::now());

        assert_eq!(snapshot.coin_id, "ethereum");
        assert_eq!(snapshot.price, dec!(3100.25));
        assert_eq!(snapshot.market_cap, dec!(372000000000));
        assert_eq!(snapshot.percent_change_24h, Some(dec!(2.5)));
        assert_eq!(snapshot.currency, "usd");
        assert_eq!(snapshot.timestamp, updated);
    }

    #[test]
    fn test_to_snapshot_handles_missing_values() {
        let fetched_at = Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap();
        let entry = MarketEntry {
            id: "newcoin".to_string(),
            symbol: "new".to_string(),
            name: "New Coin".to_string(),
            current_price: None,
            market_cap: None,
            price_change_percentage_24h: None,
            last_updated: None,
        };

        let snapshot = to_snapshot(&entry, "eur", fetched_at);

        assert_eq!(snapshot.price, Decimal::ZERO);
        assert_eq!(snapshot.market_cap, Decimal::ZERO);
        assert_eq!(snapshot.percent_change_24h, None);
        assert_eq!(snapshot.timestamp, fetched_at);
    }
}
