use axum::{
    extract::{Query, State},
    Json,
};
use coin_core::CoinSnapshot;

use crate::commands::serve::{middleware::AppError, models::CurrencyQuery, state::AppState};

/// GET /api/coins
/// Top coins by market cap, served from cache while fresh
pub async fn get_coins(
    State(state): State<AppState>,
    Query(query): Query<CurrencyQuery>,
) -> Result<Json<Vec<CoinSnapshot>>, AppError> {
    let currency = query.currency_or(&state.base_currency);
    let coins = state.market.get_coins(currency).await?;

    Ok(Json(coins))
}
