//! Core library for the `skymood` weather dashboard.
//!
//! This crate defines:
//! - Day/night classification and background clip selection
//! - Grouping of the 5-day forecast into calendar days, with paging
//! - The OpenWeather fetch client and its error taxonomy
//! - Configuration handling
//!
//! It is used by `skymood-cli`, but the pure parts can back any renderer.

pub mod asset;
pub mod config;
pub mod dashboard;
pub mod daylight;
pub mod error;
pub mod forecast;
pub mod model;
pub mod provider;

pub use asset::{BackgroundAsset, ConditionFamily, select_background_asset};
pub use config::Config;
pub use dashboard::Dashboard;
pub use daylight::is_night;
pub use error::FetchError;
pub use forecast::{DateZone, DayBoundary, ForecastDay, ForecastDays, ForecastPager, group_by_day};
pub use model::{Coordinates, Forecast, ForecastSample, WeatherSnapshot};
pub use provider::{WeatherProvider, provider_from_config};
