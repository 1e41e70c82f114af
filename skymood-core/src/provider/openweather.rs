use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    FetchError,
    model::{Coordinates, Forecast, ForecastSample, WeatherSnapshot},
};

use super::WeatherProvider;

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const CURRENT: &str = "current weather";
const FORECAST: &str = "5-day forecast";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = format!("{}/{path}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;

        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| FetchError::Decode { endpoint, source })
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    feels_like: Option<f64>,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    id: i64,
    name: String,
    coord: OwCoord,
    timezone: i32,
    main: OwMain,
    weather: Vec<OwWeather>,
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

/// First listed condition; the API always sends one but the array may be empty.
fn primary(weather: Vec<OwWeather>) -> OwWeather {
    weather.into_iter().next().unwrap_or_else(|| OwWeather {
        main: "Unknown".to_string(),
        description: "Unknown".to_string(),
        icon: String::new(),
    })
}

impl From<OwCurrentResponse> for WeatherSnapshot {
    fn from(parsed: OwCurrentResponse) -> Self {
        let weather = primary(parsed.weather);

        WeatherSnapshot {
            city_id: parsed.id,
            location_name: parsed.name,
            country: parsed.sys.country,
            coordinates: Coordinates::new(parsed.coord.lat, parsed.coord.lon),
            timezone_offset: parsed.timezone,
            sunrise: parsed.sys.sunrise,
            sunset: parsed.sys.sunset,
            condition: weather.main,
            description: weather.description,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like.unwrap_or(parsed.main.temp),
            humidity_pct: parsed.main.humidity,
            icon: weather.icon,
        }
    }
}

impl From<OwForecastEntry> for ForecastSample {
    fn from(entry: OwForecastEntry) -> Self {
        let weather = primary(entry.weather);

        ForecastSample {
            timestamp: entry.dt,
            temperature_c: entry.main.temp,
            condition: weather.main,
            description: weather.description,
            humidity_pct: entry.main.humidity,
            icon: weather.icon,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(FetchError::EmptyQuery);
        }

        tracing::info!(city, "fetching current weather");
        let parsed: OwCurrentResponse = self
            .get_json(CURRENT, "weather", &[("q", city.to_string())])
            .await
            .map_err(|err| match err {
                FetchError::Status { status, .. } if status == StatusCode::NOT_FOUND => {
                    FetchError::CityNotFound(city.to_string())
                }
                other => other,
            })?;

        Ok(parsed.into())
    }

    async fn forecast(&self, coordinates: Coordinates) -> Result<Forecast, FetchError> {
        tracing::info!(%coordinates, "fetching forecast");
        let parsed: OwForecastResponse = self
            .get_json(
                FORECAST,
                "forecast",
                &[
                    ("lat", coordinates.latitude.to_string()),
                    ("lon", coordinates.longitude.to_string()),
                ],
            )
            .await?;

        let mut samples: Vec<ForecastSample> =
            parsed.list.into_iter().map(ForecastSample::from).collect();
        samples.sort_by_key(|s| s.timestamp);

        Ok(Forecast {
            city_name: parsed.city.name,
            timezone_offset: parsed.city.timezone,
            samples,
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
