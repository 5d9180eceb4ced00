use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;

use crate::{ForecastResult, Location, provider::truncate_body};

use super::ForecastFetcher;

/// Series requested from the `daily` parameter.
pub const DAILY_SERIES: &str = "temperature_2m_min,temperature_2m_max";

/// Daily forecast from the Open-Meteo `/v1/forecast` endpoint.
#[derive(Debug, Clone)]
pub struct OpenMeteoFetcher {
    base_url: String,
    http: Client,
}

impl OpenMeteoFetcher {
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.to_string(), http: Client::new() }
    }
}

#[async_trait]
impl ForecastFetcher for OpenMeteoFetcher {
    async fn fetch_forecast(&self, location: &Location, timezone: &str) -> Result<ForecastResult> {
        tracing::debug!(url = %self.base_url, %location, timezone, "requesting forecast");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", location.latitude.as_str()),
                ("longitude", location.longitude.as_str()),
                ("timezone", timezone),
                ("daily", DAILY_SERIES),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo (forecast)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Open-Meteo forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: ForecastResult =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo forecast JSON")?;

        parsed.daily.ensure_aligned()?;

        if let Some(units) = &parsed.daily_units {
            tracing::debug!(max = %units.max, min = %units.min, "daily temperature units");
        }
        tracing::debug!(days = parsed.daily.len(), "forecast decoded");

        Ok(parsed)
    }
}
