use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoinError {
    #[error("Market data provider unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Persistence failure: {0}")]
    Persistence(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),
}
