//! Publication date handling.
//!
//! The API stores `published_at` as an ISO-8601-ish timestamp, sometimes
//! with a space instead of `T` and without an offset. Listings show it as
//! `d MMM yy` with Brazilian Portuguese month names (`8 jan 21`).

use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an API timestamp into a calendar date.
pub fn parse_published_at(input: &str) -> Option<NaiveDate> {
    let input = input.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.date_naive());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|parsed| parsed.date())
        .or_else(|| NaiveDate::parse_from_str(input, "%Y-%m-%d").ok())
}

/// Format an API timestamp for display (`8 jan 21`).
pub fn format_published_at(input: &str) -> Option<String> {
    parse_published_at(input).map(|date| {
        date.format_localized("%-d %b %y", Locale::pt_BR)
            .to_string()
    })
}
