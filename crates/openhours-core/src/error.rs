//! Schedule error types.

use thiserror::Error;

use crate::time_range::TimeRange;

/// Errors raised while parsing or assembling a schedule.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// A time string is not in `HH:MM` form.
    #[error("invalid time format: '{0}' (expected HH:MM)")]
    InvalidTimeFormat(String),

    /// A range string does not consist of exactly two `HH:MM` segments.
    #[error("invalid range format: '{0}' (expected HH:MM-HH:MM)")]
    InvalidRangeFormat(String),

    /// Two ranges of the same day overlap.
    #[error("time ranges {0} and {1} overlap")]
    OverlappingRanges(TimeRange, TimeRange),

    /// A weekday key or lookup argument is not one of the seven weekdays.
    #[error("invalid day name: '{0}'")]
    InvalidDayName(String),

    /// An exception key is not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid date: '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// JSON configuration could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for schedule operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;
