//! OpenHours Core - Weekly opening hours with date exceptions.
//!
//! This crate validates a declarative opening-hours schedule and answers
//! "is it open?" queries against it.
//!
//! ## Building Blocks
//!
//! - [`Time`]: minute of the day, parsed from `HH:MM`
//! - [`TimeRange`]: `HH:MM-HH:MM`, possibly spanning midnight
//! - [`DaySchedule`]: non-overlapping ranges for one day
//! - [`WeekSchedule`]: one day schedule per weekday plus date exceptions
//!
//! ## Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use openhours_core::WeekSchedule;
//!
//! let schedule: WeekSchedule = r#"{
//!     "monday": ["09:00-17:00"],
//!     "exceptions": { "2024-12-25": [] }
//! }"#
//! .parse()
//! .unwrap();
//!
//! let monday = NaiveDate::from_ymd_opt(2024, 12, 23).unwrap();
//! assert!(schedule.is_open_at(monday.and_hms_opt(10, 0, 0).unwrap()));
//! assert!(schedule.is_open_on("monday").unwrap());
//! assert!(!schedule.is_open_on("tuesday").unwrap());
//! ```

pub mod config;
pub mod day_schedule;
pub mod error;
pub mod time;
pub mod time_range;
pub mod week_schedule;
pub mod weekday;

pub use config::ScheduleConfig;
pub use day_schedule::DaySchedule;
pub use error::{Result, ScheduleError};
pub use time::Time;
pub use time_range::TimeRange;
pub use week_schedule::{ResolvedDay, WeekSchedule};
pub use weekday::Weekday;
