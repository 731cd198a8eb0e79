mod handlers;
mod middleware;
mod models;
pub mod routes;
pub mod state;

use anyhow::Result;
use coin_core::{normalize_currency, Clock, SystemClock};
use coin_service::Scheduler;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::cli::ServeArgs;
use crate::commands::common::{build_cache, build_source, require_database_url, Storage};
use crate::commands::serve::{routes::create_routes, state::AppState};

/// Execute the serve command - start the REST API server and history scheduler
pub async fn execute(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting API server on {}:{}", args.host, args.port);

    let base_currency = normalize_currency(&args.upstream.base_currency)?;

    // Storage first: the scheduler must not run before the database is ready
    let storage = if args.in_memory {
        Storage::in_memory()
    } else {
        Storage::postgres(&require_database_url(args.database_url.clone())?).await?
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let state = AppState::new(
        storage,
        build_source(&args.upstream)?,
        build_cache(&args.upstream),
        clock.clone(),
        base_currency.clone(),
    );

    let shutdown = CancellationToken::new();
    let scheduler = Scheduler::new(
        state.recorder.clone(),
        clock,
        Duration::from_secs(args.history_interval_secs.max(1)),
        base_currency,
    )
    .spawn(shutdown.clone());

    let app = create_routes(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .layer(TimeoutLayer::new(Duration::from_secs(30))),
    );

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("API server listening on http://{}", addr);
    tracing::info!("Health check available at: http://{}/api/health", addr);

    tokio::spawn(wait_for_ctrl_c(shutdown.clone()));

    let token = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { token.cancelled().await })
        .await?;

    // Server may also stop on its own error; make sure the scheduler follows
    shutdown.cancel();
    if let Err(e) = scheduler.await {
        tracing::error!("History scheduler task failed: {}", e);
    }

    tracing::info!("✓ Server stopped");
    Ok(())
}

async fn wait_for_ctrl_c(shutdown: CancellationToken) {
    match signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
            shutdown.cancel();
        }
        Err(e) => {
            tracing::error!("Failed to listen for Ctrl+C signal: {}", e);
        }
    }
}
