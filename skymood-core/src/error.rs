use reqwest::StatusCode;
use thiserror::Error;

/// Failure to obtain current weather or a forecast.
///
/// Classification and grouping never fail; these are the only errors a
/// dashboard refresh can surface.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Enter a city name to search for.")]
    EmptyQuery,

    #[error("City '{0}' was not found.")]
    CityNotFound(String),

    #[error("OpenWeather {endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to reach OpenWeather ({endpoint})")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse OpenWeather {endpoint} JSON")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::CityNotFound(_))
    }
}
