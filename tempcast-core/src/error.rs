use thiserror::Error;

/// Lookup failures that callers need to tell apart from plain transport or
/// decode errors. They travel inside `anyhow::Error`; use `downcast_ref`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("Invalid location '{input}': expected <latitude,longitude>")]
    InvalidLocation { input: String },

    /// The timezone service answered, but without a usable `timezoneId`.
    #[error("Timezone service response has no `timezoneId` string{}", reason_suffix(.reason))]
    MissingTimezone { reason: Option<String> },

    #[error(
        "Forecast daily series are misaligned: {dates} dates, {max} max temperatures, {min} min temperatures"
    )]
    MisalignedSeries { dates: usize, max: usize, min: usize },
}

fn reason_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(r) => format!(" ({r})"),
        None => String::new(),
    }
}
