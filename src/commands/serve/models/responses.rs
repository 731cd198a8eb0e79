use chrono::{DateTime, Utc};
use coin_database::StoreSummary;
use serde::{Serialize, Serializer};

/// Custom serializer for DateTime<Utc> to UNIX timestamp in seconds
fn serialize_timestamp_as_unix<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(dt.timestamp())
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Body of `POST /api/history`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    pub saved: usize,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    #[serde(serialize_with = "serialize_timestamp_as_unix")]
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

/// Row counts and time range of both stores
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub backend: String,
    pub current: StoreSummary,
    pub history: StoreSummary,
    pub cache_populated: bool,
    #[serde(serialize_with = "serialize_timestamp_as_unix")]
    pub timestamp: DateTime<Utc>,
}
