use std::io::{self, Write};

use tempcast_core::ForecastResult;

/// Print the summary block, then one block per day with temperatures in Fahrenheit.
pub fn write_forecast<W: Write>(
    out: &mut W,
    location: &str,
    forecast: &ForecastResult,
) -> io::Result<()> {
    writeln!(out, "Weather data for {location}:")?;
    writeln!(out, "Timezone: {}", forecast.timezone)?;
    writeln!(out, "Elevation: {:.6} meters", forecast.elevation)?;
    writeln!(out, "Generation Time (ms): {:.6}", forecast.generation_time_ms)?;
    writeln!(out, "Latitude: {:.6}", forecast.latitude)?;
    writeln!(out, "Longitude: {:.6}", forecast.longitude)?;
    writeln!(out, "Timezone Abbreviation: {}", forecast.timezone_abbreviation)?;
    writeln!(out, "UTC Offset (seconds): {}", forecast.utc_offset_seconds)?;

    for day in forecast.daily.days() {
        writeln!(out, "Date: {}", day.date)?;
        writeln!(out, "Max Temperature: {}", fahrenheit(day.max_f()))?;
        writeln!(out, "Min Temperature: {}", fahrenheit(day.min_f()))?;
        writeln!(out)?;
    }

    Ok(())
}

fn fahrenheit(value: Option<f64>) -> String {
    match value {
        Some(f) => format!("{f:.6} F"),
        None => "n/a".to_string(),
    }
}
