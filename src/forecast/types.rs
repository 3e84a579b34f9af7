// Open-Meteo response types and request errors.

use serde::Deserialize;
use serde_json::error::Category;
use thiserror::Error;

/// Body of a `/v1/forecast` response. Only the fields we read are modeled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub daily: Option<DailyForecast>,
}

/// Daily aggregates, one array element per day of the requested range.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyForecast {
    #[serde(default)]
    pub precipitation_sum: Option<Vec<Option<f64>>>,
}

impl ForecastResponse {
    /// Precipitation for the first day of the range, if the API reported one.
    pub fn first_precipitation_sum(&self) -> Option<f64> {
        self.daily
            .as_ref()
            .and_then(|daily| daily.precipitation_sum.as_ref())
            .and_then(|sums| sums.first().copied().flatten())
    }
}

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("response is not valid JSON: {0}")]
    Decode(serde_json::Error),

    #[error("unexpected response shape: {0}")]
    Shape(String),
}

impl ForecastError {
    /// Classify a body parse failure: broken JSON is an API fault, valid JSON of the
    /// wrong shape is not.
    pub fn from_body_error(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => ForecastError::Shape(err.to_string()),
            Category::Io | Category::Syntax | Category::Eof => ForecastError::Decode(err),
        }
    }

    /// True for transport, status, and malformed-body failures.
    pub fn is_network(&self) -> bool {
        !matches!(self, ForecastError::Shape(_))
    }
}
