//! Everything derived from one city search, rebuilt wholesale on each search.

use chrono::{DateTime, Utc};

use crate::{
    FetchError, WeatherProvider,
    asset::{BackgroundAsset, select_background_asset},
    forecast::{DateZone, DayBoundary, ForecastPager, group_by_day},
    model::{Forecast, WeatherSnapshot},
};

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub snapshot: WeatherSnapshot,
    pub is_night: bool,
    pub background: BackgroundAsset,
    /// Zone used for the forecast's date keys and clock labels.
    pub zone: DateZone,
    pub forecast: ForecastPager,
}

impl Dashboard {
    /// Derives the dashboard from already-fetched data.
    pub fn assemble(
        snapshot: WeatherSnapshot,
        forecast: Forecast,
        boundary: DayBoundary,
        now: DateTime<Utc>,
    ) -> Self {
        let is_night = snapshot.is_night_at(now);
        let background = select_background_asset(&snapshot.condition, is_night);
        let zone = DateZone::resolve(boundary, forecast.timezone_offset);
        let days = group_by_day(&forecast.samples, zone);

        tracing::debug!(
            city = %snapshot.location_name,
            is_night,
            background = %background,
            days = days.len(),
            "assembled dashboard"
        );

        Self {
            snapshot,
            is_night,
            background,
            zone,
            forecast: ForecastPager::new(days),
        }
    }

    /// Fetches current weather for `city`, then the forecast at the
    /// resolved coordinates.
    pub async fn load(
        provider: &dyn WeatherProvider,
        city: &str,
        boundary: DayBoundary,
        now: DateTime<Utc>,
    ) -> Result<Self, FetchError> {
        let snapshot = provider.current(city).await?;
        let forecast = provider.forecast(snapshot.coordinates).await?;
        Ok(Self::assemble(snapshot, forecast, boundary, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinates, ForecastSample};
    use chrono::TimeZone;

    fn snapshot(condition: &str) -> WeatherSnapshot {
        let sunrise = Utc.with_ymd_and_hms(2026, 3, 10, 6, 0, 0).unwrap().timestamp();
        WeatherSnapshot {
            city_id: 2988507,
            location_name: "Paris".into(),
            country: Some("FR".into()),
            coordinates: Coordinates::new(48.8534, 2.3488),
            timezone_offset: 0,
            sunrise,
            sunset: sunrise + 12 * 3600,
            condition: condition.into(),
            description: condition.to_lowercase(),
            temperature_c: 9.4,
            feels_like_c: 7.0,
            humidity_pct: 81,
            icon: "10d".into(),
        }
    }

    fn forecast(count: i64) -> Forecast {
        let start = Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap().timestamp();
        Forecast {
            city_name: "Paris".into(),
            timezone_offset: 0,
            samples: (0..count)
                .map(|i| ForecastSample {
                    timestamp: start + i * 10_800,
                    temperature_c: 8.0,
                    condition: "Rain".into(),
                    description: "light rain".into(),
                    humidity_pct: 90,
                    icon: "10d".into(),
                })
                .collect(),
        }
    }

    #[test]
    fn daytime_rain() {
        let noon = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let dash = Dashboard::assemble(snapshot("Rain"), forecast(16), DayBoundary::City, noon);

        assert!(!dash.is_night);
        assert_eq!(dash.background, BackgroundAsset::RainDay);
        assert_eq!(dash.forecast.len(), 2);
        assert_eq!(dash.forecast.cursor(), 0);
    }

    #[test]
    fn night_snow() {
        let late = Utc.with_ymd_and_hms(2026, 3, 10, 23, 0, 0).unwrap();
        let dash = Dashboard::assemble(snapshot("Snow"), forecast(0), DayBoundary::Utc, late);

        assert!(dash.is_night);
        assert_eq!(dash.background, BackgroundAsset::SnowNight);
        assert!(dash.forecast.current_day().is_none());
    }
}
