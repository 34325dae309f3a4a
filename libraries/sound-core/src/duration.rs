//! Duration formatting
//!
//! Episodes carry their length as whole seconds. The player and the episode
//! listings show it as `HH:MM:SS`, every field zero-padded to two digits.

use crate::error::{CoreError, Result};

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;

/// Format a number of seconds as `HH:MM:SS`
///
/// Hours are not wrapped into days, so anything past 99 hours simply gets a
/// wider hour field.
///
/// ```rust
/// use sound_core::format_duration;
///
/// assert_eq!(format_duration(0), "00:00:00");
/// assert_eq!(format_duration(3661), "01:01:01");
/// ```
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = seconds % SECONDS_PER_MINUTE;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Parse an `HH:MM:SS` string back into seconds
///
/// Inverse of [`format_duration`]. Minutes and seconds must be below 60.
pub fn parse_duration(input: &str) -> Result<u64> {
    let fields: Vec<&str> = input.split(':').collect();
    let [hours, minutes, secs] = fields.as_slice() else {
        return Err(CoreError::invalid_duration(
            input,
            "expected three fields separated by ':'",
        ));
    };

    let hours = parse_field(input, hours)?;
    let minutes = parse_field(input, minutes)?;
    let secs = parse_field(input, secs)?;

    if minutes >= SECONDS_PER_MINUTE || secs >= SECONDS_PER_MINUTE {
        return Err(CoreError::invalid_duration(
            input,
            "minutes and seconds must be below 60",
        ));
    }

    hours
        .checked_mul(SECONDS_PER_HOUR)
        .and_then(|total| total.checked_add(minutes * SECONDS_PER_MINUTE + secs))
        .ok_or_else(|| CoreError::invalid_duration(input, "value overflows"))
}

/// Parse a numeric duration as sent by the episode API
///
/// The API ships durations as numbers or numeric strings (`"3981"`,
/// `"3981.0"`). Fractional seconds are truncated. Negative, non-finite and
/// non-numeric values are rejected.
pub fn parse_seconds(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CoreError::invalid_duration(input, "empty value"));
    }

    if let Ok(seconds) = trimmed.parse::<u64>() {
        return Ok(seconds);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| CoreError::invalid_duration(input, "not a number"))?;

    if !value.is_finite() {
        return Err(CoreError::invalid_duration(input, "not a finite number"));
    }
    if value < 0.0 {
        return Err(CoreError::invalid_duration(input, "negative duration"));
    }
    if value >= u64::MAX as f64 {
        return Err(CoreError::invalid_duration(input, "value overflows"));
    }

    Ok(value.trunc() as u64)
}

fn parse_field(input: &str, field: &str) -> Result<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::invalid_duration(
            input,
            format!("field {:?} is not a number", field),
        ));
    }

    field
        .parse()
        .map_err(|_| CoreError::invalid_duration(input, "value overflows"))
}
