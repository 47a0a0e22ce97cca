//! Date helpers for the booking API
//!
//! The API exchanges local wall-clock times as separate date (`2024-03-01`)
//! and time (`10:00`) strings, so everything here works on
//! [`NaiveDateTime`].

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Date format used in request parameters and responses
pub const API_DATE_FORMAT: &str = "%Y-%m-%d";
/// Time format used in request parameters
pub const API_TIME_FORMAT: &str = "%H:%M";
/// Time format returned on bookings
pub const API_TIME_WITH_SECONDS_FORMAT: &str = "%H:%M:%S";

/// Hour of day that default pickups start at
const DEFAULT_PICKUP_HOUR: u32 = 10;
/// Days between today and the default pickup, and between pickup and return
const DEFAULT_LEAD_DAYS: i64 = 3;

/// Format the date part for a request parameter
pub fn api_date(value: &NaiveDateTime) -> String {
    value.format(API_DATE_FORMAT).to_string()
}

/// Format the time part for a request parameter
pub fn api_time(value: &NaiveDateTime) -> String {
    value.format(API_TIME_FORMAT).to_string()
}

/// Combine an API date and time string
///
/// Accepts times with or without seconds.
pub fn parse_api_date_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date, API_DATE_FORMAT).ok()?;
    let time = NaiveTime::parse_from_str(time, API_TIME_WITH_SECONDS_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(time, API_TIME_FORMAT))
        .ok()?;
    Some(date.and_time(time))
}

/// 10:00 today, or 10:00 tomorrow when that has already passed
pub fn ten_am_today_or_tomorrow(now: NaiveDateTime) -> NaiveDateTime {
    let ten = NaiveTime::from_hms_opt(DEFAULT_PICKUP_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);
    let today = now.date().and_time(ten);
    if today < now {
        today + Duration::days(1)
    } else {
        today
    }
}

/// Default pickup and return times relative to `now`
pub fn default_range(now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let start = ten_am_today_or_tomorrow(now) + Duration::days(DEFAULT_LEAD_DAYS);
    let end = start + Duration::days(DEFAULT_LEAD_DAYS);
    (start, end)
}
