//! Calendar date and Julian date conversion functions
//!
//! This module provides functionality for converting between Julian dates and
//! calendar dates, and for deriving the century-scale time argument used by
//! the ephemeris polynomials.

use crate::constants::{DAYS_PER_CENTURY, J1900};
use chrono::{DateTime, Datelike, Timelike, Utc};

/// Convert Julian day integer to calendar date (year, month, day)
///
/// Uses the proleptic Gregorian calendar.
pub fn compute_calendar_date(jd_integer: i32) -> (i32, i32, i32) {
    // See the Explanatory Supplement to the Astronomical Almanac 15.11.
    let f = jd_integer + 1401 + (4 * jd_integer + 274277) / 146097 * 3 / 4 - 38;

    let e = 4 * f + 3;
    let g = (e % 1461) / 4;
    let h = 5 * g + 2;
    let day = (h % 153) / 5 + 1;
    let month = (h / 153 + 2) % 12 + 1;
    let year = e / 1461 - 4716 + (12 + 2 - month) / 12;

    (year, month, day)
}

/// Convert (year, month, day) to Julian date float
///
/// The day may carry a fraction; the result refers to the civil date at
/// 00:00 UT plus that fraction. Uses the proleptic Gregorian calendar.
pub fn compute_julian_date(year: i32, month: i32, day: f64) -> f64 {
    compute_julian_day(year, month, day.floor() as i32) as f64 - 0.5 + day.fract()
}

/// Convert (year, month, day) to Julian day integer
///
/// Uses the proleptic Gregorian calendar.
pub fn compute_julian_day(year: i32, month: i32, day: i32) -> i32 {
    let janfeb = month < 3;

    1461 * (year + 4800 - if janfeb { 1 } else { 0 }) / 4
        + 367 * (month - 2 + if janfeb { 12 } else { 0 }) / 12
        - 3 * ((year + 4900 - if janfeb { 1 } else { 0 }) / 100) / 4
        - 32075
        + day
}

/// Julian date of a UTC timestamp
pub fn julian_date_from_utc(dt: &DateTime<Utc>) -> f64 {
    let day = dt.day() as f64
        + (dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0) / 24.0;
    compute_julian_date(dt.year(), dt.month() as i32, day)
}

/// Julian centuries elapsed since epoch 1900 January 0.5
pub fn centuries_since_1900(jd: f64) -> f64 {
    (jd - J1900) / DAYS_PER_CENTURY
}

/// Format a Julian date as a calendar date string (YYYY-MM-DD)
pub fn format_date(jd: f64) -> String {
    let (year, month, day) = compute_calendar_date((jd + 0.5).floor() as i32);
    format!("{:04}-{:02}-{:02}", year, month, day)
}
