use crate::coingecko::conversions::to_snapshot;
use crate::coingecko::types::{ApiErrorBody, MarketEntry};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use coin_core::{CoinSnapshot, MarketDataSource};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Number of coins requested per fetch.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Upper bound on a single upstream request, connect included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Connection settings for the CoinGecko client
#[derive(Debug, Clone)]
pub struct CoinGeckoConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub per_page: u32,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl CoinGeckoConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A client for the CoinGecko `/coins/markets` endpoint.
#[derive(Clone)]
pub struct CoinGeckoClient {
    http: reqwest::Client,
    config: CoinGeckoConfig,
}

impl CoinGeckoClient {
    pub fn new(config: CoinGeckoConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("coin-dash/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, config })
    }

    fn markets_url(&self) -> String {
        format!("{}/coins/markets", self.config.base_url.trim_end_matches('/'))
    }

    async fn get_markets(&self, currency: &str) -> Result<Vec<MarketEntry>> {
        let per_page = self.config.per_page.to_string();
        let mut request = self
            .http
            .get(self.markets_url())
            .header("accept", "application/json")
            .query(&[
                ("vs_currency", currency),
                ("order", "market_cap_desc"),
                ("per_page", per_page.as_str()),
                ("page", "1"),
            ]);

        if let Some(key) = &self.config.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                anyhow!("markets request timed out after {:?}", self.config.timeout)
            } else {
                anyhow!("markets request failed: {}", e)
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|body| body.message())
                .unwrap_or(text);
            return Err(anyhow!(
                "markets request failed with status: {}. Body: {}",
                status,
                message
            ));
        }

        let entries = response
            .json::<Vec<MarketEntry>>()
            .await
            .context("Failed to decode markets response")?;
        Ok(entries)
    }
}

#[async_trait]
impl MarketDataSource for CoinGeckoClient {
    fn get_name(&self) -> &str {
        "coingecko"
    }

    async fn fetch_markets(&self, currency: &str) -> Result<Vec<CoinSnapshot>> {
        let fetched_at = Utc::now();
        let entries = self.get_markets(currency).await?;

        tracing::debug!(
            "Fetched {} market entries from coingecko in {}",
            entries.len(),
            currency
        );

        Ok(entries
            .iter()
            .map(|entry| to_snapshot(entry, currency, fetched_at))
            .collect())
    }
}
