use axum::{
    routing::{get, post},
    Router,
};

use crate::commands::serve::{handlers, state::AppState};

/// Create the main API router with all endpoints
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // Health & metadata
        .route("/api/health", get(handlers::health::health_check))
        .route("/api/stats", get(handlers::health::store_stats))
        // Market
        .route("/api/coins", get(handlers::coins::get_coins))
        // History
        .route("/api/history", post(handlers::history::save_history))
        .route(
            "/api/history/:coin_id",
            get(handlers::history::get_coin_history),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::common::Storage;
    use anyhow::Result;
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use chrono::{DateTime, TimeZone, Utc};
    use coin_core::{CoinSnapshot, MarketDataSource, SystemClock};
    use coin_database::{CurrentSnapshotStore, HistoryStore, MemoryRepository, StoreSummary};
    use coin_upstream::PriceCache;
    use rust_decimal_macros::dec;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    fn bitcoin(price: rust_decimal::Decimal, hour: u32) -> CoinSnapshot {
        CoinSnapshot {
            coin_id: "bitcoin".to_string(),
            name: "Bitcoin".to_string(),
            symbol: "btc".to_string(),
            price,
            market_cap: dec!(1300000000000),
            percent_change_24h: Some(dec!(1.5)),
            currency: "usd".to_string(),
            timestamp: ts(hour),
        }
    }

    struct FixedSource {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl MarketDataSource for FixedSource {
        fn get_name(&self) -> &str {
            "fixed"
        }

        async fn fetch_markets(&self, currency: &str) -> Result<Vec<CoinSnapshot>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("markets request failed with status: 429 Too Many Requests");
            }

            let mut coin = bitcoin(dec!(67000.5), 0);
            coin.currency = currency.to_string();
            Ok(vec![coin])
        }
    }

    /// Store that fails every operation
    struct BrokenStore;

    #[async_trait]
    impl CurrentSnapshotStore for BrokenStore {
        async fn replace_all(&self, _: &[CoinSnapshot]) -> Result<()> {
            anyhow::bail!("connection reset")
        }

        async fn find_all(&self) -> Result<Vec<CoinSnapshot>> {
            anyhow::bail!("connection reset")
        }

        async fn summary(&self) -> Result<StoreSummary> {
            anyhow::bail!("connection reset")
        }
    }

    #[async_trait]
    impl HistoryStore for BrokenStore {
        async fn append(&self, _: &[CoinSnapshot]) -> Result<()> {
            anyhow::bail!("connection reset")
        }

        async fn query_by_coin(&self, _: &str, _: Option<&str>) -> Result<Vec<CoinSnapshot>> {
            anyhow::bail!("connection reset")
        }

        async fn summary(&self) -> Result<StoreSummary> {
            anyhow::bail!("connection reset")
        }
    }

    struct TestApp {
        router: Router,
        repo: Arc<MemoryRepository>,
        source: Arc<FixedSource>,
    }

    fn test_app(fail_upstream: bool) -> TestApp {
        let repo = Arc::new(MemoryRepository::new());
        let source = Arc::new(FixedSource {
            calls: AtomicUsize::new(0),
            fail: fail_upstream,
        });
        let storage = Storage {
            pool: None,
            current: repo.clone(),
            history: repo.clone(),
        };

        let state = AppState::new(
            storage,
            source.clone(),
            Arc::new(PriceCache::new(Duration::from_secs(300))),
            Arc::new(SystemClock),
            "usd",
        );

        TestApp {
            router: create_routes(state),
            repo,
            source,
        }
    }

    fn broken_app() -> Router {
        let store = Arc::new(BrokenStore);
        let storage = Storage {
            pool: None,
            current: store.clone(),
            history: store,
        };
        let source = Arc::new(FixedSource {
            calls: AtomicUsize::new(0),
            fail: false,
        });

        create_routes(AppState::new(
            storage,
            source,
            Arc::new(PriceCache::default()),
            Arc::new(SystemClock),
            "usd",
        ))
    }

    async fn send(router: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    #[tokio::test]
    async fn test_get_coins_returns_camel_case_rows() {
        let app = test_app(false);

        let (status, body) = send(&app.router, "GET", "/api/coins").await;

        assert_eq!(status, StatusCode::OK);
        let coins = body.as_array().unwrap();
        assert_eq!(coins.len(), 1);
        assert_eq!(coins[0]["coinId"], "bitcoin");
        assert_eq!(coins[0]["price"], 67000.5);
        assert_eq!(coins[0]["currency"], "usd");
        assert!(coins[0].get("marketCap").is_some());
    }

    #[tokio::test]
    async fn test_get_coins_serves_second_request_from_cache() {
        let app = test_app(false);

        send(&app.router, "GET", "/api/coins?currency=usd").await;
        let (status, _) = send(&app.router, "GET", "/api/coins?currency=USD").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(app.source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_coins_rejects_bad_currency() {
        let app = test_app(false);

        let (status, body) = send(&app.router, "GET", "/api/coins?currency=u%24d").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "BadRequest");
        assert_eq!(app.source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_get_coins_upstream_failure_is_500() {
        let app = test_app(true);

        let (status, body) = send(&app.router, "GET", "/api/coins").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "UpstreamError");
        assert!(app.repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_history_copies_current_rows() {
        let app = test_app(false);
        send(&app.router, "GET", "/api/coins").await;

        let (status, body) = send(&app.router, "POST", "/api/history").await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Snapshot saved to history");
        assert_eq!(body["saved"], 1);

        let (status, body) = send(&app.router, "GET", "/api/history/bitcoin").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["history"].as_array().unwrap().len(), 1);
        assert_eq!(body["coinDetails"]["coinId"], "bitcoin");
    }

    #[tokio::test]
    async fn test_get_history_orders_points_and_picks_latest() {
        let app = test_app(false);
        app.repo
            .append(&[bitcoin(dec!(105), 1), bitcoin(dec!(100), 0), bitcoin(dec!(98), 2)])
            .await
            .unwrap();

        let (status, body) = send(&app.router, "GET", "/api/history/bitcoin").await;

        assert_eq!(status, StatusCode::OK);
        let prices: Vec<f64> = body["history"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["price"].as_f64().unwrap())
            .collect();
        assert_eq!(prices, vec![100.0, 105.0, 98.0]);
        assert_eq!(body["coinDetails"]["price"], 98.0);
    }

    #[tokio::test]
    async fn test_get_history_unknown_coin_is_404() {
        let app = test_app(false);

        let (status, body) = send(&app.router, "GET", "/api/history/dogecoin").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NotFound");
        assert_eq!(body["message"], "Coin dogecoin not found");
        assert_eq!(body.as_object().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failing_store_is_500() {
        let router = broken_app();

        let (status, body) = send(&router, "POST", "/api/history").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "DatabaseError");

        let (status, _) = send(&router, "GET", "/api/history/bitcoin").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _) = send(&router, "GET", "/api/coins").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_health_and_stats_in_memory() {
        let app = test_app(false);
        send(&app.router, "GET", "/api/coins").await;

        let (status, body) = send(&app.router, "GET", "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "in-memory");

        let (status, body) = send(&app.router, "GET", "/api/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["backend"], "memory");
        assert_eq!(body["current"]["rowCount"], 1);
        assert_eq!(body["history"]["rowCount"], 0);
        assert!(body["current"].get("distinctCoins").is_some());
        assert_eq!(body["cachePopulated"], true);
    }
}
