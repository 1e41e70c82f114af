use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, Select, Text};
use skymood_core::{
    Config, Dashboard, DayBoundary, FetchError, WeatherProvider, provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skymood", version, about = "Weather dashboard with mood backgrounds")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key, default city and day boundary.
    Configure,

    /// Show current weather and one forecast day for a city.
    Show {
        /// City name; falls back to the configured default.
        city: Option<String>,

        /// Forecast day to show, 0 being the first.
        #[arg(long, default_value_t = 0)]
        day: usize,

        /// Calendar used to split forecast days: city, utc or viewer.
        #[arg(long)]
        boundary: Option<String>,
    },

    /// Page through the forecast day by day.
    Browse {
        /// City name; falls back to the configured default.
        city: Option<String>,

        /// Calendar used to split forecast days: city, utc or viewer.
        #[arg(long)]
        boundary: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nav {
    Previous,
    Next,
    Search,
    Quit,
}

impl std::fmt::Display for Nav {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Nav::Previous => "< previous day",
            Nav::Next => "next day >",
            Nav::Search => "search another city",
            Nav::Quit => "quit",
        })
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config),
            Command::Show { city, day, boundary } => {
                let (provider, boundary) = session(&config, boundary)?;
                let mut dash = load(provider.as_ref(), &config, city, boundary).await?;
                dash.forecast.jump_to(day);

                println!("{}", render::render_current(&dash, &config, Utc::now()));
                println!();
                println!("{}", render::render_day(&dash.forecast, dash.zone));
                Ok(())
            }
            Command::Browse { city, boundary } => {
                let (provider, boundary) = session(&config, boundary)?;
                let mut dash = load(provider.as_ref(), &config, city, boundary).await?;
                println!("{}", render::render_current(&dash, &config, Utc::now()));
                browse(provider.as_ref(), &config, boundary, &mut dash).await
            }
        }
    }
}

fn session(
    config: &Config,
    boundary: Option<String>,
) -> anyhow::Result<(Box<dyn WeatherProvider>, DayBoundary)> {
    let boundary = match boundary {
        Some(b) => DayBoundary::try_from(b.as_str())?,
        None => config.day_boundary()?,
    };
    Ok((provider_from_config(config)?, boundary))
}

async fn load(
    provider: &dyn WeatherProvider,
    config: &Config,
    city: Option<String>,
    boundary: DayBoundary,
) -> anyhow::Result<Dashboard> {
    let city = city.unwrap_or_else(|| config.default_city().to_string());
    tracing::debug!(%city, %boundary, "loading dashboard");

    Dashboard::load(provider, &city, boundary, Utc::now())
        .await
        .with_context(|| format!("Could not load weather for '{city}'"))
}

/// Replaces the dashboard with the result of a new search. A failed search
/// leaves the current dashboard untouched.
fn apply_search(
    dash: &mut Dashboard,
    outcome: Result<Dashboard, FetchError>,
) -> Result<(), FetchError> {
    *dash = outcome?;
    Ok(())
}

async fn browse(
    provider: &dyn WeatherProvider,
    config: &Config,
    boundary: DayBoundary,
    dash: &mut Dashboard,
) -> anyhow::Result<()> {
    loop {
        println!();
        println!("{}", render::render_day(&dash.forecast, dash.zone));

        let mut options = Vec::with_capacity(4);
        if dash.forecast.has_previous() {
            options.push(Nav::Previous);
        }
        if dash.forecast.has_next() {
            options.push(Nav::Next);
        }
        options.push(Nav::Search);
        options.push(Nav::Quit);

        let choice = match Select::new("Navigate:", options).prompt_skippable() {
            Ok(Some(choice)) => choice,
            Ok(None) | Err(InquireError::OperationInterrupted) => Nav::Quit,
            Err(err) => return Err(err.into()),
        };

        match choice {
            Nav::Previous => {
                dash.forecast.previous_day();
            }
            Nav::Next => {
                dash.forecast.next_day();
            }
            Nav::Search => {
                let Some(city) = Text::new("City:").prompt_skippable()? else {
                    continue;
                };
                let city = city.trim();
                if city.is_empty() {
                    continue;
                }

                let outcome = Dashboard::load(provider, city, boundary, Utc::now()).await;
                match apply_search(dash, outcome) {
                    Ok(()) => {
                        println!();
                        println!("{}", render::render_current(dash, config, Utc::now()));
                    }
                    Err(err) => eprintln!("{err}"),
                }
            }
            Nav::Quit => return Ok(()),
        }
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeather API key (leave empty to keep the current one):")
        .without_confirmation()
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key);
    } else if config.api_key.is_none() {
        println!(
            "No API key stored; set {} before searching.",
            skymood_core::config::API_KEY_ENV
        );
    }

    let city = Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()?;
    config.default_city = Some(city.trim().to_string());

    let current = config.day_boundary().unwrap_or_default();
    let start = DayBoundary::all().iter().position(|b| *b == current).unwrap_or(0);
    let boundary = Select::new("Split forecast days by:", DayBoundary::all().to_vec())
        .with_starting_cursor(start)
        .prompt()?;
    config.set_day_boundary(boundary);

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use skymood_core::{Coordinates, Forecast, ForecastSample, WeatherSnapshot};

    fn dashboard(city: &str, days: i64) -> Dashboard {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let start = Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap().timestamp();
        let snapshot = WeatherSnapshot {
            city_id: 1,
            location_name: city.into(),
            country: None,
            coordinates: Coordinates::new(0.0, 0.0),
            timezone_offset: 0,
            sunrise: start + 6 * 3600,
            sunset: start + 18 * 3600,
            condition: "Clear".into(),
            description: "clear sky".into(),
            temperature_c: 20.0,
            feels_like_c: 20.0,
            humidity_pct: 40,
            icon: "01d".into(),
        };
        let forecast = Forecast {
            city_name: city.into(),
            timezone_offset: 0,
            samples: (0..days * 8)
                .map(|i| ForecastSample {
                    timestamp: start + i * 10_800,
                    temperature_c: 18.0,
                    condition: "Clear".into(),
                    description: "clear sky".into(),
                    humidity_pct: 40,
                    icon: "01d".into(),
                })
                .collect(),
        };
        Dashboard::assemble(snapshot, forecast, DayBoundary::City, now)
    }

    #[test]
    fn new_search_replaces_dashboard_and_resets_cursor() {
        let mut dash = dashboard("Sydney", 5);
        dash.forecast.next_day();
        dash.forecast.next_day();
        assert_eq!(dash.forecast.cursor(), 2);

        apply_search(&mut dash, Ok(dashboard("Oslo", 5))).unwrap();
        assert_eq!(dash.snapshot.location_name, "Oslo");
        assert_eq!(dash.forecast.cursor(), 0);
    }

    #[test]
    fn failed_search_keeps_current_dashboard() {
        let mut dash = dashboard("Sydney", 5);
        dash.forecast.next_day();

        let err = apply_search(&mut dash, Err(FetchError::CityNotFound("Atlantis".into())))
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(dash.snapshot.location_name, "Sydney");
        assert_eq!(dash.forecast.cursor(), 1);
    }
}
