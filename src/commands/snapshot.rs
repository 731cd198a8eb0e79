use anyhow::Result;
use coin_core::{normalize_currency, Clock, SystemClock};
use coin_service::{MarketService, SnapshotRecorder};
use std::sync::Arc;

use crate::cli::SnapshotArgs;
use crate::commands::common::{build_cache, build_source, require_database_url, Storage};

/// Fetch the market once, refresh the current set and append it to history
pub async fn execute(args: SnapshotArgs) -> Result<()> {
    let currency = normalize_currency(&args.upstream.base_currency)?;
    let storage = Storage::postgres(&require_database_url(args.database_url)?).await?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let market = Arc::new(MarketService::new(
        build_source(&args.upstream)?,
        build_cache(&args.upstream),
        storage.current.clone(),
        clock.clone(),
    ));
    let recorder = SnapshotRecorder::new(market, storage.current, storage.history, clock);

    tracing::info!("Capturing history snapshot in {}", currency);
    let saved = recorder.capture(&currency).await?;
    tracing::info!("✓ History snapshot saved: {} rows", saved);

    Ok(())
}
