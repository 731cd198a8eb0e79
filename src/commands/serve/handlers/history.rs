use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use coin_core::CoinHistory;

use crate::commands::serve::{
    middleware::AppError,
    models::{CurrencyQuery, MessageResponse},
    state::AppState,
};

/// POST /api/history
/// Copy the current top-coins set into the history log
pub async fn save_history(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let saved = state.recorder.save_current_to_history().await?;
    tracing::info!("✓ Saved {} current rows to history", saved);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Snapshot saved to history".to_string(),
            saved,
        }),
    ))
}

/// GET /api/history/:coin_id
/// Chart series for one coin plus its most recent record
pub async fn get_coin_history(
    State(state): State<AppState>,
    Path(coin_id): Path<String>,
    Query(query): Query<CurrencyQuery>,
) -> Result<Json<CoinHistory>, AppError> {
    let history = state
        .history
        .get_history(&coin_id, query.currency())
        .await?;

    Ok(Json(history))
}
