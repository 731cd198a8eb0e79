#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use coin_core::{Clock, CoinSnapshot, MarketDataSource};
use coin_database::MemoryRepository;
use coin_service::{HistoryService, MarketService, SnapshotRecorder};
use coin_upstream::PriceCache;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn at(now: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(now),
        })
    }

    pub fn advance(&self, secs: i64) {
        let mut now = self.now.lock().unwrap();
        *now = *now + ChronoDuration::seconds(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Upstream double that counts calls and can be scripted to fail.
pub struct MockSource {
    calls: AtomicUsize,
    failures: Mutex<VecDeque<bool>>,
}

impl MockSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            failures: Mutex::new(VecDeque::new()),
        })
    }

    /// The next `n` calls fail before the source recovers.
    pub fn fail_next(&self, n: usize) {
        let mut failures = self.failures.lock().unwrap();
        failures.extend(std::iter::repeat(true).take(n));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataSource for MockSource {
    fn get_name(&self) -> &str {
        "mock"
    }

    async fn fetch_markets(&self, currency: &str) -> Result<Vec<CoinSnapshot>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let fail = self.failures.lock().unwrap().pop_front().unwrap_or(false);
        if fail {
            anyhow::bail!("connection refused");
        }

        Ok((0..10)
            .map(|rank| {
                coin(
                    &format!("coin-{}", rank),
                    dec!(100) + Decimal::from(call as u64),
                    currency,
                    base_time(),
                )
            })
            .collect())
    }
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
}

pub fn coin(coin_id: &str, price: Decimal, currency: &str, timestamp: DateTime<Utc>) -> CoinSnapshot {
    CoinSnapshot {
        coin_id: coin_id.to_string(),
        name: coin_id.to_string(),
        symbol: coin_id.chars().take(3).collect(),
        price,
        market_cap: price * dec!(1000000),
        percent_change_24h: Some(dec!(0.1)),
        currency: currency.to_string(),
        timestamp,
    }
}

/// All services wired against one in-memory repository.
pub struct Harness {
    pub clock: Arc<ManualClock>,
    pub source: Arc<MockSource>,
    pub repo: Arc<MemoryRepository>,
    pub market: Arc<MarketService>,
    pub history: HistoryService,
    pub recorder: Arc<SnapshotRecorder>,
}

impl Harness {
    pub fn new(ttl: Duration) -> Self {
        Self::at(base_time(), ttl)
    }

    pub fn at(now: DateTime<Utc>, ttl: Duration) -> Self {
        let clock = ManualClock::at(now);
        let source = MockSource::new();
        let repo = Arc::new(MemoryRepository::new());

        let market = Arc::new(MarketService::new(
            source.clone(),
            Arc::new(PriceCache::new(ttl)),
            repo.clone(),
            clock.clone(),
        ));
        let history = HistoryService::new(repo.clone());
        let recorder = Arc::new(SnapshotRecorder::new(
            market.clone(),
            repo.clone(),
            repo.clone(),
            clock.clone(),
        ));

        Self {
            clock,
            source,
            repo,
            market,
            history,
            recorder,
        }
    }
}
