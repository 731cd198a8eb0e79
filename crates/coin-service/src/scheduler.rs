use crate::snapshot::SnapshotRecorder;
use coin_core::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Default capture cadence: top of every hour.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(60 * 60);

/// Periodic history capture.
///
/// Ticks fire on wall-clock multiples of `period` (every hour on the hour by
/// default). A failed cycle is logged and dropped; the next tick runs
/// regardless. Ticks missed while a cycle overran are skipped, not replayed.
pub struct Scheduler {
    recorder: Arc<SnapshotRecorder>,
    clock: Arc<dyn Clock>,
    period: Duration,
    currency: String,
}

impl Scheduler {
    pub fn new(
        recorder: Arc<SnapshotRecorder>,
        clock: Arc<dyn Clock>,
        period: Duration,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            recorder,
            clock,
            period,
            currency: currency.into(),
        }
    }

    /// Time until the next wall-clock boundary of `period`.
    pub fn delay_to_next_tick(&self) -> Duration {
        let period_ms = self.period.as_millis().max(1) as i64;
        let now_ms = self.clock.now().timestamp_millis();
        let elapsed = now_ms.rem_euclid(period_ms);

        Duration::from_millis((period_ms - elapsed) as u64)
    }

    /// Run the loop on a new task until `shutdown` is cancelled.
    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    pub async fn run(self, shutdown: CancellationToken) {
        let first = self.delay_to_next_tick();
        tracing::info!(
            "History scheduler started (period: {}s, currency: {}, first capture in {}s)",
            self.period.as_secs(),
            self.currency,
            first.as_secs()
        );

        let mut ticker = interval_at(Instant::now() + first, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Shutdown signal received for history scheduler");
                    break;
                }
                _ = ticker.tick() => {
                    self.run_cycle().await;
                }
            }
        }

        tracing::info!("History scheduler stopped");
    }

    async fn run_cycle(&self) {
        match self.recorder.capture(&self.currency).await {
            Ok(count) => {
                tracing::info!(
                    "✓ [SCHEDULER] History snapshot saved: {} rows at {}",
                    count,
                    self.clock.now()
                );
            }
            Err(e) => {
                tracing::error!("[SCHEDULER] Failed to save history: {}", e);
            }
        }
    }
}
