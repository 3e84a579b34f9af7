// Runtime configuration.
// Holds the cache location and the weather API endpoint settings.

#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use crate::cache::paths;

/// Open-Meteo forecast endpoint.
pub const OPEN_METEO_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Timezone the daily aggregates are computed in.
pub const DEFAULT_TIMEZONE: &str = "Europe/London";

/// Request timeout for the forecast API: 10 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file backing the forecast cache.
    pub cache_path: PathBuf,
    /// Full URL of the forecast endpoint (no query string).
    pub api_base_url: String,
    /// Value of the `timezone` query parameter.
    pub timezone: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_path: paths::default_cache_path(),
            api_base_url: OPEN_METEO_FORECAST_URL.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = path.into();
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
