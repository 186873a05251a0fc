//! Weekly opening hours with date exceptions.
//!
//! A [`WeekSchedule`] holds one [`DaySchedule`] per weekday plus overrides
//! for specific calendar dates. An exception replaces the weekday default for
//! its date entirely; the two are never merged.
//!
//! ## Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use openhours_core::{ScheduleConfig, WeekSchedule};
//!
//! let config = ScheduleConfig::new()
//!     .with_day("monday", ["09:00-17:00"])
//!     .with_exception("2024-12-23", ["10:00-12:00"]);
//! let schedule = WeekSchedule::build(&config).unwrap();
//!
//! let monday = NaiveDate::from_ymd_opt(2024, 12, 16).unwrap();
//! assert!(schedule.is_open_at(monday.and_hms_opt(16, 0, 0).unwrap()));
//!
//! let exception = NaiveDate::from_ymd_opt(2024, 12, 23).unwrap();
//! assert!(!schedule.is_open_at(exception.and_hms_opt(16, 0, 0).unwrap()));
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::ScheduleConfig;
use crate::day_schedule::DaySchedule;
use crate::error::{Result, ScheduleError};
use crate::time::Time;
use crate::weekday::Weekday;

/// Date format of exception keys.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The schedule that applies on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedDay<'a> {
    /// The date has an exception.
    Exception(&'a DaySchedule),
    /// The date uses the default for its weekday.
    WeekdayDefault(&'a DaySchedule),
}

impl<'a> ResolvedDay<'a> {
    /// The schedule in effect.
    pub fn schedule(&self) -> &'a DaySchedule {
        match *self {
            ResolvedDay::Exception(schedule) | ResolvedDay::WeekdayDefault(schedule) => schedule,
        }
    }

    /// Returns true if an exception overrides the weekday default.
    pub fn is_exception(&self) -> bool {
        matches!(self, ResolvedDay::Exception(_))
    }
}

/// Opening hours for every day of the week, with date exceptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleConfig", into = "ScheduleConfig")]
pub struct WeekSchedule {
    days: [DaySchedule; 7],
    exceptions: BTreeMap<NaiveDate, DaySchedule>,
}

impl WeekSchedule {
    /// Validates a configuration and builds the schedule from it.
    ///
    /// Days missing from the configuration are closed all day.
    pub fn build(config: &ScheduleConfig) -> Result<Self> {
        // Every day name is checked before any ranges are parsed. Entries
        // are applied in input order, so a later key for the same day wins.
        let days = config
            .days
            .iter()
            .map(|(name, ranges)| Weekday::parse(name).map(|day| (day, ranges)))
            .collect::<Result<Vec<_>>>()?;

        let mut schedule = Self::default();

        for (day, ranges) in days {
            schedule.days[day.index()] = DaySchedule::from_range_strings(ranges)?;
        }

        for (key, ranges) in &config.exceptions {
            let date = parse_exception_date(key)?;
            schedule
                .exceptions
                .insert(date, DaySchedule::from_range_strings(ranges)?);
            tracing::trace!("Registered exception for {}", date);
        }

        tracing::debug!(
            open_days = schedule.days.iter().filter(|day| !day.is_empty()).count(),
            exceptions = schedule.exceptions.len(),
            "Built week schedule"
        );

        Ok(schedule)
    }

    /// Returns true if `config` builds into a schedule.
    pub fn is_valid(config: &ScheduleConfig) -> bool {
        match Self::build(config) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Rejected schedule configuration: {}", e);
                false
            }
        }
    }

    /// Decodes and builds a schedule from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::build(&ScheduleConfig::from_json_str(json)?)
    }

    /// Converts back to a declarative configuration.
    pub fn to_config(&self) -> ScheduleConfig {
        let days = self
            .for_week()
            .filter(|(_, schedule)| !schedule.is_empty())
            .map(|(day, schedule)| (day.to_string(), schedule.clone().into()))
            .collect();

        let exceptions = self
            .exceptions
            .iter()
            .map(|(date, schedule)| (date.format(DATE_FORMAT).to_string(), schedule.clone().into()))
            .collect();

        ScheduleConfig { exceptions, days }
    }

    /// Schedule for a day name (any case).
    pub fn for_weekday(&self, name: &str) -> Result<&DaySchedule> {
        Ok(self.for_day(Weekday::parse(name)?))
    }

    /// Schedule for a weekday.
    pub fn for_day(&self, day: Weekday) -> &DaySchedule {
        &self.days[day.index()]
    }

    /// All seven weekdays with their schedules, Monday first.
    pub fn for_week(&self) -> impl Iterator<Item = (Weekday, &DaySchedule)> {
        Weekday::ALL.into_iter().zip(self.days.iter())
    }

    /// Determines which schedule applies on `date`.
    pub fn resolve(&self, date: NaiveDate) -> ResolvedDay<'_> {
        match self.exceptions.get(&date) {
            Some(schedule) => ResolvedDay::Exception(schedule),
            None => ResolvedDay::WeekdayDefault(self.for_day(Weekday::of(&date))),
        }
    }

    /// Schedule in effect on `date`.
    pub fn for_date(&self, date: NaiveDate) -> &DaySchedule {
        self.resolve(date).schedule()
    }

    /// Exception schedules by date.
    pub fn exceptions(&self) -> &BTreeMap<NaiveDate, DaySchedule> {
        &self.exceptions
    }

    /// Returns true if open at the given moment.
    pub fn is_open_at(&self, at: NaiveDateTime) -> bool {
        self.for_date(at.date()).is_open_at(Time::from_datetime(&at))
    }

    /// Returns true if closed at the given moment.
    pub fn is_closed_at(&self, at: NaiveDateTime) -> bool {
        !self.is_open_at(at)
    }

    /// Returns true if the weekday default has any opening hours.
    pub fn is_open_on(&self, name: &str) -> Result<bool> {
        Ok(!self.for_weekday(name)?.is_empty())
    }

    /// Returns true if the weekday default has no opening hours.
    pub fn is_closed_on(&self, name: &str) -> Result<bool> {
        Ok(!self.is_open_on(name)?)
    }

    /// Returns true if open at the current local time.
    pub fn is_open(&self) -> bool {
        self.is_open_at(Local::now().naive_local())
    }

    /// Returns true if closed at the current local time.
    pub fn is_closed(&self) -> bool {
        !self.is_open()
    }
}

/// Parses an exception key, requiring it to round-trip exactly.
fn parse_exception_date(key: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_FORMAT)
        .ok()
        .filter(|date| date.format(DATE_FORMAT).to_string() == key)
        .ok_or_else(|| ScheduleError::InvalidDate(key.to_string()))
}

impl TryFrom<ScheduleConfig> for WeekSchedule {
    type Error = ScheduleError;

    fn try_from(config: ScheduleConfig) -> Result<Self> {
        Self::build(&config)
    }
}

impl From<WeekSchedule> for ScheduleConfig {
    fn from(schedule: WeekSchedule) -> Self {
        schedule.to_config()
    }
}

impl FromStr for WeekSchedule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json_str(s)
    }
}
