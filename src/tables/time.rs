//! Calendar derivation from epoch milliseconds
//!
//! The raw `ts` field is epoch milliseconds. Conversion is explicitly UTC;
//! millisecond precision is preserved end to end.

use crate::error::{Error, Result};
use chrono::{DateTime, Datelike, Timelike, Utc};

/// Convert epoch milliseconds to a UTC timestamp
///
/// Fails on values outside the representable range; there is no row-skipping
/// for bad timestamps.
pub fn utc_from_epoch_ms(ms: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| Error::transform(format!("invalid epoch milliseconds: {ms}")))
}

/// Calendar fields derived from one timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarParts {
    /// Hour of day, 0-23
    pub hour: i32,
    /// Day of month, 1-31
    pub day: i32,
    /// ISO week of year, 1-53
    pub week: i32,
    /// Month, 1-12
    pub month: i32,
    /// Calendar year
    pub year: i32,
    /// Day of week, 1 = Sunday .. 7 = Saturday
    pub weekday: i32,
}

/// Derive the calendar fields of a UTC timestamp
pub fn calendar_parts(ts: DateTime<Utc>) -> CalendarParts {
    CalendarParts {
        hour: ts.hour() as i32,
        day: ts.day() as i32,
        week: ts.iso_week().week() as i32,
        month: ts.month() as i32,
        year: ts.year(),
        weekday: ts.weekday().num_days_from_sunday() as i32 + 1,
    }
}
