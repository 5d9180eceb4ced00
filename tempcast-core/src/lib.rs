//! Core library for the `tempcast` CLI.
//!
//! This crate defines:
//! - Configuration of the remote endpoints and the GeoNames account
//! - Timezone and forecast service clients behind traits
//! - Shared domain models (location, forecast, daily readings)
//!
//! It is used by `tempcast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::LookupError;
pub use model::{DailyReading, DailySeries, ForecastResult, Location, celsius_to_fahrenheit};
pub use provider::{
    ForecastFetcher, TimezoneResolver, fetch_forecast, fetcher_from_config, resolver_from_config,
};
