use chrono::{DateTime, Utc};
use coin_core::CoinSnapshot;
use parking_lot::RwLock;
use std::time::Duration;

/// Default validity window of a cached market payload.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone)]
struct CacheSlot {
    currency: String,
    data: Vec<CoinSnapshot>,
    cached_at: DateTime<Utc>,
}

/// A single-slot, time-boxed cache for the latest market payload.
///
/// The slot is keyed by currency: a lookup for another currency misses, and
/// the following `put` overwrites the slot. There is no single-flight, so
/// concurrent misses may both fetch and the last `put` wins.
///
/// Callers pass `now` explicitly; the cache never reads the clock itself.
#[derive(Debug)]
pub struct PriceCache {
    ttl: Duration,
    slot: RwLock<Option<CacheSlot>>,
}

impl PriceCache {
    /// Create a new empty cache
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Returns the cached payload if it was stored for `currency` less than
    /// `ttl` before `now`.
    pub fn get(&self, currency: &str, now: DateTime<Utc>) -> Option<Vec<CoinSnapshot>> {
        let slot = self.slot.read();
        let slot = slot.as_ref()?;

        if slot.currency != currency {
            return None;
        }

        // A negative age only happens if the clock moved backwards; still fresh.
        let fresh = match (now - slot.cached_at).to_std() {
            Ok(age) => age < self.ttl,
            Err(_) => true,
        };

        fresh.then(|| slot.data.clone())
    }

    /// Store `data` for `currency`, replacing whatever the slot held.
    pub fn put(&self, currency: &str, data: Vec<CoinSnapshot>, now: DateTime<Utc>) {
        *self.slot.write() = Some(CacheSlot {
            currency: currency.to_string(),
            data,
            cached_at: now,
        });
    }

    /// Drop the cached payload.
    pub fn invalidate(&self) {
        *self.slot.write() = None;
    }

    /// Check if the slot currently holds a payload (fresh or not)
    pub fn is_populated(&self) -> bool {
        self.slot.read().is_some()
    }
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
