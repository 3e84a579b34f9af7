// Cache-backed forecast lookup.
// Answers from the cache when possible and records every API outcome, failures included.

use tracing::{debug, error, warn};

use crate::cache::{CacheStorage, ForecastCache, ForecastKey};
use crate::error::Result;
use crate::forecast::OpenMeteoClient;

pub struct ForecastFetcher<S: CacheStorage> {
    cache: ForecastCache<S>,
    client: OpenMeteoClient,
}

impl<S: CacheStorage> ForecastFetcher<S> {
    pub fn new(cache: ForecastCache<S>, client: OpenMeteoClient) -> Self {
        Self { cache, client }
    }

    /// Precipitation in mm for `date` at (`lat`, `lon`), or `None` if unknown.
    ///
    /// A key that is already cached is returned as-is, including a cached unknown:
    /// failed lookups are not retried. API failures are logged and stored as unknown;
    /// only a failure to persist the cache is returned as an error.
    pub async fn fetch(&mut self, lat: &str, lon: &str, date: &str) -> Result<Option<f64>> {
        let key = ForecastKey::new(lat, lon, date);
        if let Some(cached) = self.cache.get(&key) {
            debug!(%key, ?cached, "Forecast cache hit");
            return Ok(cached);
        }

        debug!(%key, "Forecast cache miss, querying API");
        let precipitation = match self.client.precipitation_sum(lat, lon, date).await {
            Ok(mm) => mm,
            Err(e) if e.is_network() => {
                warn!("Network or API error: {e}");
                None
            }
            Err(e) => {
                error!("Unexpected error: {e}");
                None
            }
        };

        self.cache.set(key, precipitation)?;
        Ok(precipitation)
    }

    pub fn cache(&self) -> &ForecastCache<S> {
        &self.cache
    }
}
