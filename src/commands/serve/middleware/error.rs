use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use coin_core::CoinError;

use crate::commands::serve::models::ErrorResponse;

/// Custom error type for API handlers
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Upstream(String),
    Database(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BadRequest", msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NotFound", msg),
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UpstreamError",
                    "Failed to fetch coins from the market data provider".to_string(),
                )
            }
            AppError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DatabaseError",
                    "An error occurred while accessing the database".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<CoinError> for AppError {
    fn from(err: CoinError) -> Self {
        match err {
            CoinError::InvalidCurrency(currency) => {
                AppError::BadRequest(format!("Unsupported currency: {}", currency))
            }
            CoinError::NotFound(msg) => AppError::NotFound(msg),
            CoinError::UpstreamUnavailable(msg) => AppError::Upstream(msg),
            CoinError::Persistence(msg) => AppError::Database(msg),
        }
    }
}
