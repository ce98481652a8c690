use thiserror::Error;

use crate::model::GeocodeLookup;

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;

/// Failures surfaced by the lookup adapter.
///
/// Only `AreaCodeUnavailable` is a "soft" condition; the current-weather tool
/// turns it into text. Everything else is a hard failure for the caller.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Failed to resolve an area code: {lookup}")]
    AreaCodeUnavailable { lookup: GeocodeLookup },

    #[error("Failed to send request to AMap ({endpoint})")]
    Http {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("AMap {endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse AMap {endpoint} JSON")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(#[source] serde_json::Error),

    #[error("Unknown tool '{0}'. Supported tools: get_current_weather, get_forecast.")]
    UnknownTool(String),
}
