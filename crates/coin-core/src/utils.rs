/// Utility functions shared across the coin-dash crates
use crate::error::CoinError;

/// Currency used when a request does not name one, and for scheduled captures.
pub const DEFAULT_CURRENCY: &str = "usd";

/// Normalize a vs-currency code to the lowercase form the upstream expects.
///
/// Accepts ASCII alphanumeric codes between 2 and 10 characters, which covers
/// fiat codes ("usd", "INR") as well as crypto denominations ("btc", "sats").
/// Surrounding whitespace is ignored.
pub fn normalize_currency(currency: &str) -> Result<String, CoinError> {
    let trimmed = currency.trim();

    if trimmed.len() < 2
        || trimmed.len() > 10
        || !trimmed.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(CoinError::InvalidCurrency(currency.to_string()));
    }

    Ok(trimmed.to_ascii_lowercase())
}
