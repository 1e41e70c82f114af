//! Plain-text rendering of a dashboard.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use skymood_core::{
    Config, Dashboard, DateZone, ForecastDay, ForecastPager, asset::condition_family,
    model::DEFAULT_MAP_ZOOM,
};

/// Whole degrees, truncated toward zero like the headline figure.
pub fn headline_temperature(temperature_c: f64) -> i64 {
    temperature_c.trunc() as i64
}

pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// e.g. "Tuesday, March 10th".
pub fn day_heading(date: NaiveDate) -> String {
    format!("{} {}", date.format("%A, %B"), ordinal(date.day()))
}

pub fn render_current(dash: &Dashboard, config: &Config, now: DateTime<Utc>) -> String {
    let snap = &dash.snapshot;
    let local = snap.local_time(now);
    let clip = config.asset_path(&dash.background.file_name());

    [
        format!(
            "{}°  {}",
            headline_temperature(snap.temperature_c),
            snap.display_name()
        ),
        format!("{} - {}", local.format("%H:%M"), local.format("%A, %B %-d")),
        format!(
            "{} ({}), feels like {:.1}°C, humidity {}%",
            snap.condition, snap.description, snap.feels_like_c, snap.humidity_pct
        ),
        format!("Icon:       {}", snap.icon_url()),
        format!(
            "Map:        {} ({})",
            snap.coordinates.map_url(DEFAULT_MAP_ZOOM),
            snap.coordinates
        ),
        format!(
            "Background: {} [{}]",
            clip.display(),
            if dash.is_night { "night" } else { "day" }
        ),
    ]
    .join("\n")
}

pub fn render_day(pager: &ForecastPager, zone: DateZone) -> String {
    let Some(day) = pager.current_day() else {
        return "No forecast data available.".to_string();
    };

    let prev = if pager.has_previous() { "<" } else { " " };
    let next = if pager.has_next() { ">" } else { " " };

    let mut lines = vec![format!(
        "{prev} {} {next}   (day {} of {})",
        day_heading(day.date),
        pager.cursor() + 1,
        pager.len()
    )];
    if let Some((low, high)) = day.temperature_range() {
        lines.push(format!("  low {low}°C  high {high}°C"));
    }
    lines.extend(render_samples(day, zone));
    lines.join("\n")
}

fn render_samples(day: &ForecastDay, zone: DateZone) -> Vec<String> {
    day.samples
        .iter()
        .map(|sample| {
            let family = condition_family(&sample.condition).map_or("other", |f| f.as_str());
            format!(
                "  {}  {}°C  {:<24} humidity {:>3}%  [{}]  {}",
                zone.local_datetime(sample.timestamp).format("%H:%M"),
                sample.temperature_c,
                sample.description,
                sample.humidity_pct,
                family,
                sample.icon_url()
            )
        })
        .collect()
}
