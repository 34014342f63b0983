#![forbid(unsafe_code)]

//! Date and time presentation for the page.
//!
//! The live clock shows Jakarta wall time in an en-US layout; form
//! receipts use Indonesian day-first formats.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, Utc};

/// One line for the header clock, e.g.
/// `Sat, 08/22/2026, 01:23:45 PM GMT+7`.
///
/// Jakarta is UTC+7 year round, so the shift is a fixed seven hours.
pub fn jakarta_clock_line(now: DateTime<Utc>) -> String {
    let jakarta = now.naive_utc() + TimeDelta::hours(7);
    format!("{} GMT+7", jakarta.format("%a, %m/%d/%Y, %I:%M:%S %p"))
}

/// Day-first date for receipts, e.g. `05/06/2000`.
pub fn format_date_id(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Day-first timestamp with dotted 24h time, e.g. `22/08/2026, 13.05.09`.
pub fn format_timestamp_id(at: NaiveDateTime) -> String {
    at.format("%d/%m/%Y, %H.%M.%S").to_string()
}

/// Completed years between `birth` and `today`. The year difference is
/// reduced by one when this year's birthday has not happened yet.
pub fn calculate_age(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}
