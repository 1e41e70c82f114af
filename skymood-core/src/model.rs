use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::daylight;

const ICON_BASE_URL: &str = "http://openweathermap.org/img/wn";
const MAP_BASE_URL: &str = "https://www.openstreetmap.org/";

/// Default zoom level for the map pin.
pub const DEFAULT_MAP_ZOOM: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// OpenStreetMap link with a marker on these coordinates.
    pub fn map_url(&self, zoom: u8) -> String {
        format!(
            "{MAP_BASE_URL}?mlat={lat:.4}&mlon={lon:.4}#map={zoom}/{lat:.4}/{lon:.4}",
            lat = self.latitude,
            lon = self.longitude,
        )
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Current conditions for one city, as returned by a single search.
///
/// A new search produces a new snapshot; snapshots are never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city_id: i64,
    pub location_name: String,
    pub country: Option<String>,
    pub coordinates: Coordinates,
    /// Seconds east of UTC.
    pub timezone_offset: i32,
    /// UTC epoch seconds.
    pub sunrise: i64,
    /// UTC epoch seconds.
    pub sunset: i64,
    /// Primary condition group, e.g. "Rain" or "Clouds".
    pub condition: String,
    pub description: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub icon: String,
}

impl WeatherSnapshot {
    pub fn display_name(&self) -> String {
        match &self.country {
            Some(country) => format!("{}, {}", self.location_name, country),
            None => self.location_name.clone(),
        }
    }

    pub fn icon_url(&self) -> String {
        icon_url(&self.icon)
    }

    pub fn is_night_at(&self, now: DateTime<Utc>) -> bool {
        daylight::is_night(self.timezone_offset, self.sunrise, self.sunset, now)
    }

    /// Wall-clock time at the snapshot's location.
    pub fn local_time(&self, now: DateTime<Utc>) -> NaiveDateTime {
        daylight::local_clock(self.timezone_offset, now)
    }
}

/// One 3-hourly forecast entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// UTC epoch seconds.
    pub timestamp: i64,
    pub temperature_c: f64,
    pub condition: String,
    pub description: String,
    pub humidity_pct: u8,
    pub icon: String,
}

impl ForecastSample {
    pub fn icon_url(&self) -> String {
        icon_url(&self.icon)
    }
}

/// Forecast payload for one city, samples in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city_name: String,
    pub timezone_offset: i32,
    pub samples: Vec<ForecastSample>,
}

fn icon_url(icon: &str) -> String {
    format!("{ICON_BASE_URL}/{icon}@2x.png")
}
