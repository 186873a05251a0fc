//! Opening hours for a single day.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::time::Time;
use crate::time_range::TimeRange;

/// Validated, ordered list of the ranges a day is open.
///
/// An empty schedule means closed all day. Ranges keep the order they were
/// given in and cannot be changed after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct DaySchedule {
    ranges: Vec<TimeRange>,
}

impl DaySchedule {
    /// A schedule that is closed all day.
    pub fn closed() -> Self {
        Self::default()
    }

    /// Parses and validates a list of `HH:MM-HH:MM` strings.
    ///
    /// Fails with [`ScheduleError::OverlappingRanges`] on the first pair
    /// `(a, b)`, `a` listed before `b`, where `a` overlaps `b`.
    pub fn from_range_strings<I, S>(strings: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ranges = strings
            .into_iter()
            .map(|s| TimeRange::parse(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Self::from_ranges(ranges)
    }

    /// Validates already-parsed ranges.
    pub fn from_ranges(ranges: Vec<TimeRange>) -> Result<Self> {
        if let Some((a, b)) = unique_pairs(&ranges).find(|(a, b)| a.overlaps(b)) {
            return Err(ScheduleError::OverlappingRanges(*a, *b));
        }

        Ok(Self { ranges })
    }

    /// Returns true if any range contains `time`.
    pub fn is_open_at(&self, time: Time) -> bool {
        self.ranges.iter().any(|range| range.contains(time))
    }

    /// Returns true if no range contains `time`.
    pub fn is_closed_at(&self, time: Time) -> bool {
        !self.is_open_at(time)
    }

    /// Number of ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns true if the day has no ranges (closed all day).
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Range at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&TimeRange> {
        self.ranges.get(index)
    }

    /// Iterates the ranges in their original order.
    pub fn iter(&self) -> std::slice::Iter<'_, TimeRange> {
        self.ranges.iter()
    }

    /// The ranges as a slice.
    pub fn ranges(&self) -> &[TimeRange] {
        &self.ranges
    }
}

/// Every unordered pair of `items`, each pair once, earlier item first.
fn unique_pairs<T>(items: &[T]) -> impl Iterator<Item = (&T, &T)> {
    items
        .iter()
        .enumerate()
        .flat_map(move |(i, a)| items[i + 1..].iter().map(move |b| (a, b)))
}

impl Index<usize> for DaySchedule {
    type Output = TimeRange;

    fn index(&self, index: usize) -> &TimeRange {
        &self.ranges[index]
    }
}

impl<'a> IntoIterator for &'a DaySchedule {
    type Item = &'a TimeRange;
    type IntoIter = std::slice::Iter<'a, TimeRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

impl TryFrom<Vec<String>> for DaySchedule {
    type Error = ScheduleError;

    fn try_from(strings: Vec<String>) -> Result<Self> {
        Self::from_range_strings(strings)
    }
}

impl From<DaySchedule> for Vec<String> {
    fn from(schedule: DaySchedule) -> Self {
        schedule.ranges.iter().map(ToString::to_string).collect()
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

    // ==================== Pair Enumeration Tests ====================

    #[test]
    fn unique_pairs_visits_each_pair_once() {
        let pairs: Vec<(i32, i32)> = unique_pairs(&[1, 2, 3, 4]).map(|(a, b)| (*a, *b)).collect();
        assert_eq!(pairs, vec![(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)]);
    }

    #[test]
    fn unique_pairs_of_short_slices() {
        assert_eq!(unique_pairs::<i32>(&[]).count(), 0);
        assert_eq!(unique_pairs(&[1]).count(), 0);
    }

    // ==================== Construction Tests ====================

    #[test]
    fn builds_from_disjoint_ranges() {
        let day = DaySchedule::from_range_strings(["09:00-12:00", "13:00-17:00"]).unwrap();
        assert_eq!(day.len(), 2);
        assert!(!day.is_empty());
        assert_eq!(day[0], r("09:00-12:00"));
        assert_eq!(day[1], r("13:00-17:00"));
    }

    #[test]
    fn keeps_original_order() {
        let day = DaySchedule::from_range_strings(["13:00-17:00", "09:00-12:00"]).unwrap();
        let ranges: Vec<String> = day.iter().map(ToString::to_string).collect();
        assert_eq!(ranges, vec!["13:00-17:00", "09:00-12:00"]);
    }

    #[test]
    fn empty_list_is_closed() {
        let day = DaySchedule::from_range_strings(Vec::<String>::new()).unwrap();
        assert!(day.is_empty());
        assert_eq!(day, DaySchedule::closed());
        assert!(day.is_closed_at(t("12:00")));
    }

    #[test]
    fn rejects_overlapping_ranges() {
        let err = DaySchedule::from_range_strings(["09:00-12:00", "11:00-13:00"]).unwrap_err();
        match err {
            ScheduleError::OverlappingRanges(a, b) => {
                assert_eq!(a, r("09:00-12:00"));
                assert_eq!(b, r("11:00-13:00"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reports_first_overlapping_pair() {
        let err = DaySchedule::from_range_strings(["08:00-09:00", "10:00-12:00", "11:00-13:00"])
            .unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::OverlappingRanges(a, b) if a == r("10:00-12:00") && b == r("11:00-13:00")
        ));
    }

    #[test]
    fn rejects_overlap_with_overnight_range() {
        assert!(matches!(
            DaySchedule::from_range_strings(["22:00-02:00", "01:00-03:00"]),
            Err(ScheduleError::OverlappingRanges(..))
        ));
    }

    #[test]
    fn overlap_check_follows_input_order() {
        // The earlier range is asked about the later one only.
        assert!(DaySchedule::from_range_strings(["10:00-11:00", "09:00-12:00"]).is_ok());
        assert!(DaySchedule::from_range_strings(["09:00-12:00", "10:00-11:00"]).is_err());
    }

    #[test]
    fn adjacent_ranges_must_be_listed_in_order() {
        assert!(DaySchedule::from_range_strings(["09:00-12:00", "12:00-13:00"]).is_ok());
        assert!(matches!(
            DaySchedule::from_range_strings(["12:00-13:00", "09:00-12:00"]),
            Err(ScheduleError::OverlappingRanges(a, b))
                if a == r("12:00-13:00") && b == r("09:00-12:00")
        ));
    }

    #[test]
    fn propagates_parse_errors() {
        assert!(matches!(
            DaySchedule::from_range_strings(["09:00"]),
            Err(ScheduleError::InvalidRangeFormat(_))
        ));
        assert!(matches!(
            DaySchedule::from_range_strings(["09:00-12:00", "13:00-17:60"]),
            Err(ScheduleError::InvalidTimeFormat(_))
        ));
    }

    // ==================== Query Tests ====================

    #[test]
    fn open_within_any_range() {
        let day = DaySchedule::from_range_strings(["09:00-12:00", "13:00-17:00"]).unwrap();

        assert!(day.is_open_at(t("09:00")));
        assert!(day.is_open_at(t("11:59")));
        assert!(!day.is_open_at(t("12:00")));
        assert!(!day.is_open_at(t("12:30")));
        assert!(day.is_open_at(t("13:00")));
        assert!(!day.is_open_at(t("17:00")));
        assert!(day.is_closed_at(t("08:59")));
    }

    #[test]
    fn indexed_access() {
        let day = DaySchedule::from_range_strings(["09:00-12:00"]).unwrap();
        assert_eq!(day.get(0), Some(&r("09:00-12:00")));
        assert_eq!(day.get(1), None);
        assert_eq!(day.ranges().len(), 1);
    }

    #[test]
    fn iterates_by_reference() {
        let day = DaySchedule::from_range_strings(["09:00-12:00", "13:00-17:00"]).unwrap();
        let mut count = 0;
        for range in &day {
            assert!(!range.spans_midnight());
            count += 1;
        }
        assert_eq!(count, day.len());
    }

    // ==================== Serialization Tests ====================

    #[test]
    fn serializes_as_string_list() {
        let day = DaySchedule::from_range_strings(["09:00-12:00", "13:00-17:00"]).unwrap();
        let json = serde_json::to_string(&day).unwrap();
        assert_eq!(json, r#"["09:00-12:00","13:00-17:00"]"#);

        let deserialized: DaySchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, day);
    }

    #[test]
    fn deserialize_rejects_overlaps() {
        assert!(serde_json::from_str::<DaySchedule>(r#"["09:00-12:00","11:00-13:00"]"#).is_err());
    }
}
