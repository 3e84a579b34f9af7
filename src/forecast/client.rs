// Open-Meteo HTTP client.
// Requests the daily precipitation sum for one date and coordinate.

use reqwest::{
    Client, Response,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::config::Config;

use super::types::{ForecastError, ForecastResponse};

/// Daily variable requested from the API.
const DAILY_VARIABLE: &str = "precipitation_sum";

/// Forecast API client with a fixed per-request timeout.
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
    timezone: String,
}

impl OpenMeteoClient {
    /// Create a client from the endpoint, timezone, and timeout in `config`.
    pub fn new(config: &Config) -> Result<Self, ForecastError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("rain-forecast"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            timezone: config.timezone.clone(),
        })
    }

    /// Precipitation (mm) forecast for `date` at the given coordinate.
    /// `Ok(None)` means the API answered but had no value for that day.
    pub async fn precipitation_sum(
        &self,
        latitude: &str,
        longitude: &str,
        date: &str,
    ) -> Result<Option<f64>, ForecastError> {
        let params = [
            ("latitude", latitude),
            ("longitude", longitude),
            ("daily", DAILY_VARIABLE),
            ("timezone", self.timezone.as_str()),
            ("start_date", date),
            ("end_date", date),
        ];

        let response = self.client.get(&self.base_url).query(&params).send().await?;
        let response = check_response(response).await?;

        let body = response.text().await?;
        let forecast: ForecastResponse =
            serde_json::from_str(&body).map_err(ForecastError::from_body_error)?;

        Ok(forecast.first_precipitation_sum())
    }
}

/// Reject non-success statuses, keeping the body for diagnostics.
async fn check_response(response: Response) -> Result<Response, ForecastError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    Err(ForecastError::Status {
        status,
        body: response.text().await.unwrap_or_default(),
    })
}
