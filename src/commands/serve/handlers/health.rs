use axum::{extract::State, Json};
use chrono::Utc;

use crate::commands::serve::{
    middleware::AppError,
    models::{HealthResponse, StatsResponse},
    state::AppState,
};

/// GET /api/health
/// Liveness plus a database check when Postgres is configured
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match &state.pool {
        Some(pool) => match coin_database::health_check(pool).await {
            Ok(()) => "healthy",
            Err(e) => {
                tracing::warn!("Database health check failed: {:#}", e);
                "unhealthy"
            }
        },
        None => "in-memory",
    };

    Json(HealthResponse {
        status: if database == "unhealthy" {
            "degraded".to_string()
        } else {
            "ok".to_string()
        },
        database: database.to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/stats
/// Row counts and time range of the current and history stores
pub async fn store_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let current = state
        .current_store
        .summary()
        .await
        .map_err(|e| AppError::Database(format!("{:#}", e)))?;
    let history = state
        .history_store
        .summary()
        .await
        .map_err(|e| AppError::Database(format!("{:#}", e)))?;

    Ok(Json(StatsResponse {
        backend: state.backend_name().to_string(),
        current,
        history,
        cache_populated: state.market.cache().is_populated(),
        timestamp: Utc::now(),
    }))
}
