use coin_core::{Clock, MarketDataSource};
use coin_database::{CurrentSnapshotStore, HistoryStore};
use coin_service::{HistoryService, MarketService, SnapshotRecorder};
use coin_upstream::PriceCache;
use sqlx::PgPool;
use std::sync::Arc;

use crate::commands::common::Storage;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, absent when running in memory
    pub pool: Option<PgPool>,

    /// Currency used when a request does not name one
    pub base_currency: String,

    pub market: Arc<MarketService>,
    pub history: Arc<HistoryService>,
    pub recorder: Arc<SnapshotRecorder>,

    pub current_store: Arc<dyn CurrentSnapshotStore>,
    pub history_store: Arc<dyn HistoryStore>,
}

impl AppState {
    pub fn new(
        storage: Storage,
        source: Arc<dyn MarketDataSource>,
        cache: Arc<PriceCache>,
        clock: Arc<dyn Clock>,
        base_currency: impl Into<String>,
    ) -> Self {
        let market = Arc::new(MarketService::new(
            source,
            cache,
            storage.current.clone(),
            clock.clone(),
        ));
        let history = Arc::new(HistoryService::new(storage.history.clone()));
        let recorder = Arc::new(SnapshotRecorder::new(
            market.clone(),
            storage.current.clone(),
            storage.history.clone(),
            clock,
        ));

        Self {
            pool: storage.pool,
            base_currency: base_currency.into(),
            market,
            history,
            recorder,
            current_store: storage.current,
            history_store: storage.history,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        if self.pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }
}
