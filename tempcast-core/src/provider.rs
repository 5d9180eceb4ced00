use crate::{
    Config, ForecastResult, Location,
    provider::{geonames::GeoNamesResolver, openmeteo::OpenMeteoFetcher},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod geonames;
pub mod openmeteo;

/// Maps coordinates to a timezone identifier such as `Europe/Berlin`.
#[async_trait]
pub trait TimezoneResolver: Send + Sync + Debug {
    async fn resolve_timezone(&self, location: &Location) -> anyhow::Result<String>;
}

/// Fetches the daily min/max temperature series for a location.
#[async_trait]
pub trait ForecastFetcher: Send + Sync + Debug {
    async fn fetch_forecast(
        &self,
        location: &Location,
        timezone: &str,
    ) -> anyhow::Result<ForecastResult>;
}

/// Construct the timezone resolver described by `config`.
pub fn resolver_from_config(config: &Config) -> anyhow::Result<Box<dyn TimezoneResolver>> {
    let username = config.geonames_username().ok_or_else(|| {
        anyhow::anyhow!(
            "No GeoNames username configured.\n\
                 Hint: run `tempcast --configure` and enter your GeoNames account name."
        )
    })?;

    Ok(Box::new(GeoNamesResolver::new(&config.timezone.base_url, username)))
}

/// Construct the forecast fetcher described by `config`.
pub fn fetcher_from_config(config: &Config) -> Box<dyn ForecastFetcher> {
    Box::new(OpenMeteoFetcher::new(&config.forecast.base_url))
}

/// Resolve the timezone, then fetch the forecast for it.
///
/// The forecast service is only contacted once the timezone is known.
pub async fn fetch_forecast(
    location: &Location,
    resolver: &dyn TimezoneResolver,
    fetcher: &dyn ForecastFetcher,
) -> anyhow::Result<ForecastResult> {
    let timezone = resolver.resolve_timezone(location).await?;
    tracing::debug!(%location, %timezone, "timezone resolved");

    fetcher.fetch_forecast(location, &timezone).await
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
