//! Grouping of 3-hourly forecast samples into calendar days, and paging
//! across those days.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, Utc};

use crate::model::ForecastSample;

/// Which calendar decides where one forecast day ends and the next begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayBoundary {
    /// The queried city's own UTC offset.
    #[default]
    City,
    Utc,
    /// The local timezone of the machine rendering the dashboard.
    Viewer,
}

impl DayBoundary {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayBoundary::City => "city",
            DayBoundary::Utc => "utc",
            DayBoundary::Viewer => "viewer",
        }
    }

    pub const fn all() -> &'static [DayBoundary] {
        &[DayBoundary::City, DayBoundary::Utc, DayBoundary::Viewer]
    }
}

impl std::fmt::Display for DayBoundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DayBoundary {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "city" => Ok(DayBoundary::City),
            "utc" => Ok(DayBoundary::Utc),
            "viewer" | "local" => Ok(DayBoundary::Viewer),
            _ => Err(anyhow::anyhow!(
                "Unknown day boundary '{value}'. Supported values: city, utc, viewer."
            )),
        }
    }
}

/// Resolved timezone used to compute date keys and clock labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateZone {
    Fixed(FixedOffset),
    Viewer,
}

impl DateZone {
    pub fn utc() -> Self {
        DateZone::Fixed(Utc.fix())
    }

    /// Zone `offset_secs` east of UTC. Offsets of a day or more are not
    /// valid and fall back to UTC.
    pub fn from_offset(offset_secs: i32) -> Self {
        match FixedOffset::east_opt(offset_secs) {
            Some(offset) => DateZone::Fixed(offset),
            None => {
                tracing::warn!(offset_secs, "timezone offset out of range, using UTC");
                Self::utc()
            }
        }
    }

    pub fn resolve(boundary: DayBoundary, city_offset_secs: i32) -> Self {
        match boundary {
            DayBoundary::City => Self::from_offset(city_offset_secs),
            DayBoundary::Utc => Self::utc(),
            DayBoundary::Viewer => DateZone::Viewer,
        }
    }

    /// Wall-clock time of a UTC epoch timestamp in this zone.
    pub fn local_datetime(&self, timestamp: i64) -> NaiveDateTime {
        let instant = DateTime::<Utc>::from_timestamp(timestamp, 0).unwrap_or_else(|| {
            tracing::warn!(timestamp, "timestamp out of range, using the Unix epoch");
            DateTime::<Utc>::default()
        });
        match self {
            DateZone::Fixed(offset) => instant.with_timezone(offset).naive_local(),
            DateZone::Viewer => instant.with_timezone(&Local).naive_local(),
        }
    }

    pub fn date_of(&self, timestamp: i64) -> NaiveDate {
        self.local_datetime(timestamp).date()
    }
}

/// Samples sharing one calendar date, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub samples: Vec<ForecastSample>,
}

impl ForecastDay {
    /// `YYYY-MM-DD` key for this day.
    pub fn key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        self.samples.iter().map(|s| s.temperature_c).fold(None, |acc, t| match acc {
            None => Some((t, t)),
            Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
        })
    }
}

/// Days ordered by first occurrence of their date in the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastDays {
    days: Vec<ForecastDay>,
}

impl ForecastDays {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ForecastDay> {
        self.days.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForecastDay> {
        self.days.iter()
    }

    pub fn keys(&self) -> Vec<String> {
        self.days.iter().map(ForecastDay::key).collect()
    }

    pub fn sample_count(&self) -> usize {
        self.days.iter().map(|d| d.samples.len()).sum()
    }
}

impl<'a> IntoIterator for &'a ForecastDays {
    type Item = &'a ForecastDay;
    type IntoIter = std::slice::Iter<'a, ForecastDay>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

/// Buckets samples by their calendar date in `zone`.
///
/// A bucket is created the first time its date is seen; later samples with
/// the same date are appended to it, so relative order is kept within each
/// bucket. Sorted input yields chronologically ordered buckets.
pub fn group_by_day(samples: &[ForecastSample], zone: DateZone) -> ForecastDays {
    let mut days: Vec<ForecastDay> = Vec::new();
    let mut index_by_date: HashMap<NaiveDate, usize> = HashMap::new();

    for sample in samples {
        let date = zone.date_of(sample.timestamp);
        let slot = *index_by_date.entry(date).or_insert_with(|| {
            days.push(ForecastDay { date, samples: Vec::new() });
            days.len() - 1
        });
        days[slot].samples.push(sample.clone());
    }

    tracing::debug!(samples = samples.len(), days = days.len(), "grouped forecast by day");
    ForecastDays { days }
}

/// Cursor over forecast days. `cursor < len` whenever any day exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastPager {
    days: ForecastDays,
    cursor: usize,
}

impl ForecastPager {
    pub fn new(days: ForecastDays) -> Self {
        Self { days, cursor: 0 }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn days(&self) -> &ForecastDays {
        &self.days
    }

    pub fn has_next(&self) -> bool {
        self.cursor + 1 < self.days.len()
    }

    pub fn has_previous(&self) -> bool {
        self.cursor > 0
    }

    /// Advances one day. Returns `false` (and does nothing) on the last day.
    pub fn next_day(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Steps back one day. Returns `false` (and does nothing) on the first day.
    pub fn previous_day(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Moves to `index`, clamped to the last day.
    pub fn jump_to(&mut self, index: usize) {
        self.cursor = index.min(self.days.len().saturating_sub(1));
    }

    /// Day under the cursor, or `None` when there is no forecast data.
    pub fn current_day(&self) -> Option<&ForecastDay> {
        self.days.get(self.cursor)
    }
}
