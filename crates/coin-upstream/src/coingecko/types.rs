use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One entry of the `/coins/markets` response. Only the fields the dashboard
/// uses are modelled; the rest of the payload is ignored.
#[derive(Debug, Deserialize, Clone)]
pub struct MarketEntry {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Error body returned by CoinGecko on rate limits and bad parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub status: Option<ApiErrorStatus>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiErrorStatus {
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl ApiErrorBody {
    /// Best-effort human readable message.
    pub fn message(&self) -> Option<String> {
        self.error.clone().or_else(|| {
            self.status
                .as_ref()
                .and_then(|s| s.error_message.clone())
        })
    }
}
