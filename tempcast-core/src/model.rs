use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::LookupError;

/// Coordinates exactly as the user typed them.
///
/// Both parts stay strings: they are forwarded verbatim to the remote
/// services, which are the ones deciding whether they are valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub latitude: String,
    pub longitude: String,
}

impl FromStr for Location {
    type Err = LookupError;

    /// Splits on `,` and keeps the first two pieces; anything after a second
    /// comma is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        match (parts.next(), parts.next()) {
            (Some(latitude), Some(longitude)) => Ok(Self {
                latitude: latitude.to_string(),
                longitude: longitude.to_string(),
            }),
            _ => Err(LookupError::InvalidLocation { input: s.to_string() }),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Decoded forecast service payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResult {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    #[serde(rename = "generationtime_ms")]
    pub generation_time_ms: f64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub utc_offset_seconds: i32,
    pub daily: DailySeries,
    #[serde(default)]
    pub daily_units: Option<DailyUnits>,
}

/// Parallel per-day sequences; position `i` in each refers to the same day.
///
/// Open-Meteo sends `null` for days without model data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailySeries {
    pub time: Vec<NaiveDate>,
    #[serde(rename = "temperature_2m_max")]
    pub max_c: Vec<Option<f64>>,
    #[serde(rename = "temperature_2m_min")]
    pub min_c: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyUnits {
    #[serde(rename = "temperature_2m_max", default)]
    pub max: String,
    #[serde(rename = "temperature_2m_min", default)]
    pub min: String,
}

/// One day of the forecast, in Celsius. `None` means the service had no value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyReading {
    pub date: NaiveDate,
    pub max_c: Option<f64>,
    pub min_c: Option<f64>,
}

impl DailyReading {
    pub fn max_f(&self) -> Option<f64> {
        self.max_c.map(celsius_to_fahrenheit)
    }

    pub fn min_f(&self) -> Option<f64> {
        self.min_c.map(celsius_to_fahrenheit)
    }
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Errors unless all three sequences have the same length.
    pub fn ensure_aligned(&self) -> Result<(), LookupError> {
        let (dates, max, min) = (self.time.len(), self.max_c.len(), self.min_c.len());
        if dates == max && dates == min {
            Ok(())
        } else {
            Err(LookupError::MisalignedSeries { dates, max, min })
        }
    }

    /// Days in order. Stops at the shortest sequence; call
    /// [`ensure_aligned`](Self::ensure_aligned) first to rule that out.
    pub fn days(&self) -> impl Iterator<Item = DailyReading> + '_ {
        self.time
            .iter()
            .zip(&self.max_c)
            .zip(&self.min_c)
            .map(|((&date, &max_c), &min_c)| DailyReading { date, max_c, min_c })
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}
