use std::{io, path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use tempcast_core::{
    Config, Location, LookupError, fetch_forecast, fetcher_from_config, resolver_from_config,
};

use crate::report;

const USAGE: &str = "Usage: tempcast <latitude,longitude>";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "tempcast",
    version,
    about = "Daily min/max temperature forecast for a coordinate pair"
)]
pub struct Cli {
    /// Coordinates as `<latitude,longitude>`, e.g. "52.52,13.41".
    #[arg(allow_hyphen_values = true)]
    pub location: Option<String>,

    /// Read configuration from this file instead of the platform default.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Prompt for the GeoNames username and save it to the config file.
    #[arg(long, conflicts_with = "location")]
    pub configure: bool,

    /// Log debug details to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub async fn run(self) -> ExitCode {
        if self.configure {
            return match configure(self.config) {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    println!("Failed to save configuration: {err:#}");
                    ExitCode::FAILURE
                }
            };
        }

        let Some(location) = self.location else {
            println!("{USAGE}");
            return ExitCode::FAILURE;
        };

        match show(&location, self.config).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                match err.downcast_ref::<LookupError>() {
                    Some(LookupError::MissingTimezone { reason }) => {
                        println!("Failed to fetch timezone data");
                        if let Some(reason) = reason {
                            println!("{reason}");
                        }
                    }
                    _ => println!("Failed to fetch weather data: {err:#}"),
                }
                ExitCode::FAILURE
            }
        }
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => path,
        None => Config::config_file_path()?,
    };
    tracing::debug!(path = %path.display(), "loading configuration");

    Config::load_from(&path)
}

async fn show(raw_location: &str, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let location: Location = raw_location.parse()?;
    let config = load_config(config_path)?;

    let resolver = resolver_from_config(&config)?;
    let fetcher = fetcher_from_config(&config);

    let forecast = fetch_forecast(&location, resolver.as_ref(), fetcher.as_ref()).await?;
    tracing::info!(days = forecast.daily.len(), timezone = %forecast.timezone, "forecast ready");

    report::write_forecast(&mut io::stdout().lock(), raw_location, &forecast)
        .context("Failed to write forecast to stdout")
}

fn configure(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = load_config(config_path.clone())?;

    let username = inquire::Text::new("GeoNames username:")
        .with_default(&config.timezone.username)
        .with_help_message("Register for free at https://www.geonames.org/login")
        .prompt()
        .context("Failed to read GeoNames username")?;
    config.set_geonames_username(username);

    let saved_to = match config_path {
        Some(path) => {
            config.save_to(&path)?;
            path
        }
        None => config.save()?,
    };

    println!("Saved configuration to {}", saved_to.display());
    Ok(())
}
