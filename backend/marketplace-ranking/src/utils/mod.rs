// Shared geo/time helpers for the rankers

use crate::models::{GeoPoint, PickupWindow};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers (haversine)
///
/// Coordinates are not validated; out-of-range input yields whatever the
/// formula produces.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Clamp a score into [0, 1]; NaN collapses to 0
pub fn clamp_unit(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// Half-life decay: 1.0 at age 0, 0.5 after one half-life
pub fn exponential_decay(age_hours: f64, half_life_hours: f64) -> f64 {
    0.5_f64.powf(age_hours / half_life_hours)
}

/// Fractional hours from `from` to `to` (negative if `to` is earlier)
pub fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 3_600_000.0
}

/// Whether the hour of `now` falls inside the window, inclusive on both ends.
///
/// Minutes are ignored. A window whose start hour is later than its end hour
/// spans midnight.
pub fn hour_in_window(now: DateTime<Utc>, window: &PickupWindow) -> bool {
    let hour = now.hour();
    let start = window.start.hour();
    let end = window.end.hour();

    if start <= end {
        hour >= start && hour <= end
    } else {
        hour >= start || hour <= end
    }
}

/// Step `months` calendar months back from `at`, keeping day and time of day.
///
/// A day that does not exist in the target month rolls forward into the next
/// month (May 31 minus three months lands on March 3, or March 2 in a leap
/// year) instead of clamping to the month end.
pub fn months_before(at: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    let total = at.year() * 12 + at.month0() as i32 - months as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_signed(Duration::days(i64::from(at.day()) - 1)))
        .map(|date| date.and_time(at.time()).and_utc())
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
