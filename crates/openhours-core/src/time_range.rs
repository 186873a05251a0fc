//! Time ranges within a day.
//!
//! A range whose end lies before its start continues past midnight
//! (e.g. `22:00-02:00`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::time::Time;

/// A range of time with a start and an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeRange {
    start: Time,
    end: Time,
}

impl TimeRange {
    /// Creates a range from two times.
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// Parses a `HH:MM-HH:MM` string.
    ///
    /// A string without exactly one `-` fails with
    /// [`ScheduleError::InvalidRangeFormat`]; a malformed segment fails with
    /// the segment's [`ScheduleError::InvalidTimeFormat`].
    pub fn parse(s: &str) -> Result<Self> {
        let segments: Vec<&str> = s.split('-').collect();

        let [start, end] = segments.as_slice() else {
            return Err(ScheduleError::InvalidRangeFormat(s.to_string()));
        };

        Ok(Self::new(Time::parse(start)?, Time::parse(end)?))
    }

    /// Start of the range.
    pub fn start(&self) -> Time {
        self.start
    }

    /// End of the range.
    pub fn end(&self) -> Time {
        self.end
    }

    /// Returns true if the range continues past midnight.
    pub fn spans_midnight(&self) -> bool {
        self.end.is_before(&self.start)
    }

    /// Checks if a given time falls within this range.
    ///
    /// Regular ranges include their start and exclude their end. A range
    /// spanning midnight excludes both boundaries: `22:00-06:00` contains
    /// `23:00` and `05:59` but neither `22:00` nor `06:00`.
    pub fn contains(&self, time: Time) -> bool {
        if self.spans_midnight() {
            if time.is_after(&self.start) {
                return time.is_after(&self.end);
            }

            return time.is_before(&self.end);
        }

        time.is_same_or_after(&self.start) && time.is_before(&self.end)
    }

    /// Returns true if this range contains either endpoint of `other`.
    ///
    /// The test is one-directional: a range lying strictly inside `other`
    /// does not overlap it unless an endpoint of `other` falls within this
    /// range.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.contains(other.start) || self.contains(other.end)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for TimeRange {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeRange {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<TimeRange> for String {
    fn from(range: TimeRange) -> Self {
        range.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Time {
        Time::parse(s).unwrap()
    }

    fn r(s: &str) -> TimeRange {
        TimeRange::parse(s).unwrap()
    }

    // ==================== Parsing Tests ====================

    #[test]
    fn parse_valid_range() {
        let range = r("09:00-17:30");
        assert_eq!(range.start(), t("09:00"));
        assert_eq!(range.end(), t("17:30"));
        assert_eq!(range.to_string(), "09:00-17:30");
    }

    #[test]
    fn parse_rejects_wrong_segment_count() {
        for input in ["09:00", "", "09:00-10:00-11:00", "09:00 10:00"] {
            assert!(
                matches!(TimeRange::parse(input), Err(ScheduleError::InvalidRangeFormat(ref s)) if s == input),
                "expected '{}' to be rejected",
                input
            );
        }
    }

    #[test]
    fn parse_surfaces_bad_segment() {
        assert!(matches!(
            TimeRange::parse("09:00-25:00"),
            Err(ScheduleError::InvalidTimeFormat(ref s)) if s == "25:00"
        ));
        assert!(matches!(
            TimeRange::parse("9:00-10:00"),
            Err(ScheduleError::InvalidTimeFormat(ref s)) if s == "9:00"
        ));
        assert!(matches!(
            TimeRange::parse("09:00-"),
            Err(ScheduleError::InvalidTimeFormat(ref s)) if s.is_empty()
        ));
    }

    // ==================== Midnight Tests ====================

    #[test]
    fn regular_range_does_not_span_midnight() {
        assert!(!r("08:00-15:00").spans_midnight());
        assert!(!r("18:00-24:00").spans_midnight());
        assert!(!r("10:00-10:00").spans_midnight());
    }

    #[test]
    fn overnight_range_spans_midnight() {
        assert!(r("22:00-06:00").spans_midnight());
        assert!(r("23:59-00:00").spans_midnight());
    }

    // ==================== Containment Tests ====================

    #[test]
    fn contains_regular_range() {
        let range = r("08:00-15:00");

        assert!(!range.contains(t("07:59"))); // Before
        assert!(range.contains(t("08:00"))); // Start (inclusive)
        assert!(range.contains(t("12:00")));
        assert!(range.contains(t("14:59")));
        assert!(!range.contains(t("15:00"))); // End (exclusive)
        assert!(!range.contains(t("20:00")));
    }

    #[test]
    fn contains_overnight_range() {
        let range = r("22:00-06:00");

        assert!(!range.contains(t("21:59")));
        assert!(!range.contains(t("22:00"))); // Start (exclusive)
        assert!(range.contains(t("22:01")));
        assert!(range.contains(t("23:00")));
        assert!(range.contains(t("00:00")));
        assert!(range.contains(t("05:59")));
        assert!(!range.contains(t("06:00"))); // End (exclusive)
        assert!(!range.contains(t("12:00")));
    }

    #[test]
    fn contains_until_end_of_day() {
        let range = r("18:00-24:00");
        assert!(range.contains(t("23:59")));
        assert!(!range.contains(t("24:00")));
        assert!(!range.contains(t("00:00")));
    }

    #[test]
    fn empty_range_contains_nothing() {
        let range = r("10:00-10:00");
        assert!(!range.contains(t("10:00")));
        assert!(!range.contains(t("09:59")));
    }

    #[test]
    fn regular_range_boundaries_hold_for_every_hour() {
        for start in 0..23u8 {
            let range = r(&format!("{:02}:00-{:02}:00", start, start + 1));
            assert!(range.contains(range.start()));
            assert!(!range.contains(range.end()));
        }
    }

    // ==================== Overlap Tests ====================

    #[test]
    fn overlapping_ranges() {
        assert!(r("09:00-12:00").overlaps(&r("11:00-13:00")));
        assert!(r("09:00-12:00").overlaps(&r("08:00-10:00")));
        assert!(r("09:00-12:00").overlaps(&r("09:00-10:00")));
        assert!(r("09:00-12:00").overlaps(&r("10:00-11:00")));
    }

    #[test]
    fn adjacency_overlap_depends_on_direction() {
        // The earlier range excludes 12:00; the later one includes it.
        assert!(!r("09:00-12:00").overlaps(&r("12:00-13:00")));
        assert!(r("12:00-13:00").overlaps(&r("09:00-12:00")));
    }

    #[test]
    fn overlap_is_one_directional() {
        let inner = r("10:00-11:00");
        let outer = r("09:00-12:00");

        assert!(outer.overlaps(&inner));
        assert!(!inner.overlaps(&outer));
    }

    #[test]
    fn overnight_overlaps() {
        assert!(r("22:00-02:00").overlaps(&r("01:00-03:00")));
        assert!(r("22:00-06:00").overlaps(&r("22:00-23:00")));
        assert!(!r("22:00-02:00").overlaps(&r("02:00-08:00")));
    }

    // ==================== Serialization Tests ====================

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&r("22:00-06:00")).unwrap();
        assert_eq!(json, "\"22:00-06:00\"");

        let deserialized: TimeRange = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, r("22:00-06:00"));
    }

    #[test]
    fn deserialize_validates() {
        assert!(serde_json::from_str::<TimeRange>("\"22:00\"").is_err());
    }
}
