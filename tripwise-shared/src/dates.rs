//! Calendar-date helpers shared by every crate.
//!
//! Dates are `chrono::NaiveDate` values, which carry no time zone, so day
//! arithmetic cannot drift across DST changes or the local UTC offset.
//! Canonical storage form is `YYYY-MM-DD`, display form is `DD-MM-YYYY`.

use std::ops::RangeInclusive;

use chrono::{Days, Local, NaiveDate};

const CANONICAL_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d-%m-%Y";

/// Maximum digits a display date can hold (DDMMYYYY)
const MASK_DIGITS: usize = 8;

/// Four-digit years only, in both text forms
const YEARS: RangeInclusive<u32> = 1000..=9999;

pub fn to_canonical(date: NaiveDate) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}

pub fn format_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Row label such as `Sun, Jun 1, 2025`
pub fn long_display(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

/// Splits a `YYYY-MM-DD` string into numeric parts without checking
/// that they form a real date. Years outside 1000..=9999 are rejected.
pub fn canonical_parts(value: &str) -> Option<(i32, u32, u32)> {
    let mut parts = value.trim().split('-');
    let year = numeric(parts.next()?)?;
    let month = numeric(parts.next()?)?;
    let day = numeric(parts.next()?)?;
    if parts.next().is_some() || !YEARS.contains(&year) {
        return None;
    }

    Some((i32::try_from(year).ok()?, month, day))
}

pub fn parse_canonical(value: &str) -> Option<NaiveDate> {
    let (year, month, day) = canonical_parts(value)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Canonical `YYYY-MM-DD` to display `DD-MM-YYYY`.
///
/// Empty input gives an empty string; anything that is not three
/// dash-separated parts is returned unchanged.
pub fn to_display(canonical: &str) -> String {
    if canonical.is_empty() {
        return String::new();
    }

    let parts: Vec<&str> = canonical.split('-').collect();
    match parts.as_slice() {
        [year, month, day] if !year.is_empty() && !month.is_empty() && !day.is_empty() => {
            format!("{:0>2}-{:0>2}-{}", day, month, year)
        }
        _ => canonical.to_string(),
    }
}

/// Parses a user-typed `DD-MM-YYYY` date.
///
/// `-`, `/`, `.` and whitespace all separate components. `None` simply means
/// the input is not (yet) a complete, real calendar date.
pub fn parse_display(text: &str) -> Option<NaiveDate> {
    let normalized: String = text
        .chars()
        .map(|c| if matches!(c, '-' | '/' | '.') { ' ' } else { c })
        .collect();
    let parts: Vec<&str> = normalized.split_whitespace().collect();

    let [day, month, year] = parts.as_slice() else {
        return None;
    };
    let day = numeric(day)?;
    let month = numeric(month)?;
    let year = numeric(year)?;

    if !(1..=31).contains(&day) || !(1..=12).contains(&month) || !YEARS.contains(&year) {
        return None;
    }

    // Rejects Feb 30, Apr 31 and friends
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// Live-typing formatter: keeps up to eight digits and inserts dashes
/// so the text grows into `DD-MM-YYYY`.
pub fn mask_digits(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(MASK_DIGITS)
        .collect();

    match digits.len() {
        0..=2 => digits,
        3..=4 => format!("{}-{}", &digits[..2], &digits[2..]),
        _ => format!("{}-{}-{}", &digits[..2], &digits[2..4], &digits[4..]),
    }
}

/// `None` when the result falls outside the representable calendar
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let delta = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(delta)
    } else {
        date.checked_sub_days(delta)
    }
}

/// Signed number of days from `start` to `end`
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Trip length counting both the first and the last day
pub fn trip_length(start: NaiveDate, end: NaiveDate) -> i64 {
    days_between(start, end) + 1
}

/// Last day of a trip of `days` days, `None` for an empty trip or one
/// running past the end of the calendar
pub fn checkout_date(start: NaiveDate, days: u32) -> Option<NaiveDate> {
    if days == 0 {
        return None;
    }
    add_days(start, i64::from(days) - 1)
}

/// Today's date in the local calendar
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn numeric(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
