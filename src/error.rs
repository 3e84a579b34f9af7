// Error types for rain-forecast.
// Covers cache storage failures and user input errors; API failures live in forecast::types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastAppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed cache: {0}")]
    MalformedCache(String),

    #[error("Weather API client error: {0}")]
    Api(#[from] crate::forecast::ForecastError),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, ForecastAppError>;
