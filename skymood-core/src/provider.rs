use crate::{
    Config, Coordinates, FetchError, Forecast, WeatherSnapshot,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions and forecasts.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current weather for a city name.
    async fn current(&self, city: &str) -> Result<WeatherSnapshot, FetchError>;

    /// 5-day forecast at 3-hour resolution, chronologically ordered.
    async fn forecast(&self, coordinates: Coordinates) -> Result<Forecast, FetchError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `skymood configure` or set OPENWEATHER_API_KEY."
        )
    })?;

    let provider = match config.base_url.as_deref() {
        Some(base_url) => OpenWeatherProvider::with_base_url(api_key, base_url),
        None => OpenWeatherProvider::new(api_key),
    };

    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let cfg = Config { api_key: Some("KEY".into()), ..Config::default() };

        let provider = provider_from_config(&cfg);
        assert!(provider.is_ok());
    }
}
