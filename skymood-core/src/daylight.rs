//! Day/night classification for a location given its UTC offset and
//! today's sunrise and sunset.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Returns `true` when `now` at the location falls outside the
/// `[sunrise, sunset]` window.
///
/// All three instants are shifted by the same offset before comparison, so
/// the window is evaluated on the location's wall clock. Both bounds belong
/// to the day. If `sunrise > sunset` the result is still deterministic: only
/// membership against each bound is checked.
pub fn is_night(timezone_offset: i32, sunrise: i64, sunset: i64, now: DateTime<Utc>) -> bool {
    let offset = i64::from(timezone_offset);
    let local_now = now.timestamp() + offset;
    let local_sunrise = sunrise + offset;
    let local_sunset = sunset + offset;

    let night = local_now > local_sunset || local_now < local_sunrise;
    tracing::debug!(local_now, local_sunrise, local_sunset, night, "classified daylight");
    night
}

/// Wall-clock time at a location `timezone_offset` seconds east of UTC.
pub fn local_clock(timezone_offset: i32, now: DateTime<Utc>) -> NaiveDateTime {
    (now + Duration::seconds(i64::from(timezone_offset))).naive_utc()
}
