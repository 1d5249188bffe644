//! Common types used throughout eve-rowset
//!
//! Shared constants and small helpers for the API's date-time convention.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Timelike, Utc};

// ============================================================================
// Time Conventions
// ============================================================================

/// The date-time format used throughout the API (`2006-01-02 15:04:05`).
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The timezone the API reports times in. Server local time, which is UTC.
pub fn default_timezone() -> FixedOffset {
    Utc.fix()
}

/// Parse an API time string in the given zone.
///
/// With [`TIME_FORMAT`] the value must be exactly `YYYY-MM-DD HH:MM:SS`:
/// two-digit fields, single separators, no sign. Other formats are handed
/// to chrono as is. Leap seconds are rejected either way.
///
/// Returns the error message on failure so callers can wrap it in their
/// own error type.
pub fn parse_time(
    value: &str,
    format: &str,
    timezone: FixedOffset,
) -> std::result::Result<DateTime<FixedOffset>, String> {
    if format == TIME_FORMAT {
        check_api_layout(value)?;
    }

    let naive = NaiveDateTime::parse_from_str(value, format).map_err(|e| e.to_string())?;
    if naive.nanosecond() >= 1_000_000_000 {
        return Err("second out of range".to_string());
    }

    timezone
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| format!("ambiguous local time in zone {timezone}"))
}

/// Byte layout of `2006-01-02 15:04:05`. chrono accepts one-digit fields
/// and runs of whitespace, so the shape is checked up front.
fn check_api_layout(value: &str) -> std::result::Result<(), String> {
    const LEN: usize = 19;

    let bytes = value.as_bytes();
    if bytes.len() != LEN {
        return Err(format!("expected {LEN} characters, got {}", bytes.len()));
    }

    for (i, &b) in bytes.iter().enumerate() {
        let ok = match i {
            4 | 7 => b == b'-',
            10 => b == b' ',
            13 | 16 => b == b':',
            _ => b.is_ascii_digit(),
        };
        if !ok {
            return Err(format!("unexpected character at position {i}"));
        }
    }

    if &bytes[17..] > b"59".as_slice() {
        return Err("second out of range".to_string());
    }

    Ok(())
}
