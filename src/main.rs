// rain-forecast: will it rain on a given day and place?
// Wires config, cache, and API client together and runs one interactive session.

mod cache;
mod cli;
mod config;
mod error;
mod fetcher;
mod forecast;
mod status;

use std::io;

use chrono::Local;
use tracing_subscriber::EnvFilter;

use crate::cache::{ForecastCache, JsonFileStorage};
use crate::config::Config;
use crate::error::Result;
use crate::fetcher::ForecastFetcher;
use crate::forecast::OpenMeteoClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::default();
    tracing::debug!(path = %config.cache_path.display(), "Using forecast cache");

    let cache = ForecastCache::load(JsonFileStorage::new(&config.cache_path))?;
    let client = OpenMeteoClient::new(&config)?;
    let mut fetcher = ForecastFetcher::new(cache, client);

    let stdin = io::stdin();
    let stdout = io::stdout();
    cli::run(
        &mut fetcher,
        &mut stdin.lock(),
        &mut stdout.lock(),
        Local::now().date_naive(),
    )
    .await
}
