// Weather API module.
// Client and types for the Open-Meteo forecast endpoint.

pub mod client;
pub mod types;

pub use client::OpenMeteoClient;
pub use types::ForecastError;
