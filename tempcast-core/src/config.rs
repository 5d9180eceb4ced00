use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_TIMEZONE_URL: &str = "http://api.geonames.org/timezoneJSON";
pub const DEFAULT_GEONAMES_USERNAME: &str = "jrh230";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// GeoNames timezone lookup settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimezoneServiceConfig {
    pub base_url: String,
    /// GeoNames account name, sent as the `username` query parameter.
    pub username: String,
}

impl Default for TimezoneServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TIMEZONE_URL.to_string(),
            username: DEFAULT_GEONAMES_USERNAME.to_string(),
        }
    }
}

/// Open-Meteo forecast settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastServiceConfig {
    pub base_url: String,
}

impl Default for ForecastServiceConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_FORECAST_URL.to_string() }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [timezone]
/// base_url = "http://api.geonames.org/timezoneJSON"
/// username = "..."
///
/// [forecast]
/// base_url = "https://api.open-meteo.com/v1/forecast"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub timezone: TimezoneServiceConfig,
    pub forecast: ForecastServiceConfig,
}

impl Config {
    /// Load config from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "tempcast", "tempcast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// GeoNames username, if one is set.
    pub fn geonames_username(&self) -> Option<&str> {
        Some(self.timezone.username.trim()).filter(|u| !u.is_empty())
    }

    pub fn set_geonames_username(&mut self, username: String) {
        self.timezone.username = username.trim().to_string();
    }
}
