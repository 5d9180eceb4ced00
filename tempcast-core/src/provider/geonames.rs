use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{LookupError, Location, provider::truncate_body};

use super::TimezoneResolver;

/// Timezone lookup against the GeoNames `timezoneJSON` endpoint.
#[derive(Debug, Clone)]
pub struct GeoNamesResolver {
    base_url: String,
    username: String,
    http: Client,
}

impl GeoNamesResolver {
    pub fn new(base_url: &str, username: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            username: username.to_string(),
            http: Client::new(),
        }
    }
}

/// Only the fields we consume. `timezoneId` is kept as a raw value so that a
/// non-string id is reported as missing rather than as a decode failure.
#[derive(Debug, Deserialize)]
struct GnTimezoneResponse {
    #[serde(rename = "timezoneId", default)]
    timezone_id: Option<serde_json::Value>,
    #[serde(default)]
    status: Option<GnStatus>,
}

/// GeoNames reports errors (bad account, quota) in-band with HTTP 200.
#[derive(Debug, Deserialize)]
struct GnStatus {
    #[serde(default)]
    message: Option<String>,
}

impl GnTimezoneResponse {
    fn into_timezone_id(self) -> Result<String, LookupError> {
        match self.timezone_id {
            Some(serde_json::Value::String(id)) => Ok(id),
            _ => Err(LookupError::MissingTimezone {
                reason: self.status.and_then(|s| s.message),
            }),
        }
    }
}

#[async_trait]
impl TimezoneResolver for GeoNamesResolver {
    async fn resolve_timezone(&self, location: &Location) -> Result<String> {
        tracing::debug!(url = %self.base_url, %location, "requesting timezone");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", location.latitude.as_str()),
                ("lng", location.longitude.as_str()),
                ("username", self.username.as_str()),
            ])
            .send()
            .await
            .context("Failed to send request to GeoNames (timezone)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read GeoNames timezone response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "GeoNames timezone request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: GnTimezoneResponse =
            serde_json::from_str(&body).context("Failed to parse GeoNames timezone JSON")?;

        parsed.into_timezone_id().map_err(|err| {
            tracing::warn!(%location, error = %err, "timezone lookup returned no timezone");
            err.into()
        })
    }
}
