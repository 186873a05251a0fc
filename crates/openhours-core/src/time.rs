//! Minute-of-day values.
//!
//! A [`Time`] is parsed from a strict `HH:MM` string. Hours run from `00` to
//! `24`; the `24:MM` values exist only so a range can end at the close of the
//! day (`18:00-24:00`).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(([0-1][0-9])|(2[0-4])):[0-5][0-9]$").expect("time pattern is valid")
});

/// Time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Time {
    hours: u8,
    minutes: u8,
}

impl Time {
    /// Parses a `HH:MM` string.
    pub fn parse(s: &str) -> Result<Self> {
        if !TIME_PATTERN.is_match(s) {
            return Err(ScheduleError::InvalidTimeFormat(s.to_string()));
        }

        // The pattern guarantees two ASCII digits on each side of the colon.
        let bytes = s.as_bytes();
        let digit = |i: usize| bytes[i] - b'0';

        Ok(Self {
            hours: digit(0) * 10 + digit(1),
            minutes: digit(3) * 10 + digit(4),
        })
    }

    /// Time of day of a chrono time, truncated to the minute.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self {
            hours: time.hour() as u8,
            minutes: time.minute() as u8,
        }
    }

    /// Time of day of any chrono date-time value.
    pub fn from_datetime<T: Timelike>(datetime: &T) -> Self {
        Self {
            hours: datetime.hour() as u8,
            minutes: datetime.minute() as u8,
        }
    }

    /// Converts back to a chrono time.
    ///
    /// Returns `None` for the `24:MM` end-of-day sentinel.
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hours as u32, self.minutes as u32, 0)
    }

    /// Hour component (0-24).
    pub fn hours(&self) -> u8 {
        self.hours
    }

    /// Minute component (0-59).
    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    /// Minutes since midnight.
    pub fn to_minutes(&self) -> u16 {
        self.hours as u16 * 60 + self.minutes as u16
    }

    /// Returns true if both times denote the same minute.
    pub fn is_same(&self, other: &Time) -> bool {
        self == other
    }

    /// Returns true if this time is strictly later than `other`.
    pub fn is_after(&self, other: &Time) -> bool {
        self.cmp(other) == Ordering::Greater
    }

    /// Returns true if this time is strictly earlier than `other`.
    pub fn is_before(&self, other: &Time) -> bool {
        !(self.is_same(other) || self.is_after(other))
    }

    /// Returns true if this time equals or is later than `other`.
    pub fn is_same_or_after(&self, other: &Time) -> bool {
        self.is_same(other) || self.is_after(other)
    }
}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.hours, self.minutes).cmp(&(other.hours, other.minutes))
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

impl FromStr for Time {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Time {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Time> for String {
    fn from(time: Time) -> Self {
        time.to_string()
    }
}
