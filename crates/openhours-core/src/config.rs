//! Declarative schedule configuration.
//!
//! The configuration is a JSON object keyed by day name, plus an optional
//! `exceptions` object keyed by calendar date:
//!
//! ```json
//! {
//!     "monday": ["09:00-12:00", "13:00-18:00"],
//!     "saturday": ["10:00-14:00"],
//!     "exceptions": {
//!         "2024-12-25": []
//!     }
//! }
//! ```
//!
//! Keys and range strings are kept as plain strings here; validation happens
//! when the configuration is turned into a [`WeekSchedule`].
//!
//! [`WeekSchedule`]: crate::WeekSchedule

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;

/// Reserved key holding the exceptions map.
pub const EXCEPTIONS_KEY: &str = "exceptions";

/// Unvalidated schedule configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Range strings per date (`YYYY-MM-DD`), overriding the day default.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub exceptions: BTreeMap<String, Vec<String>>,
    /// Range strings per day name (any case), in input order.
    #[serde(flatten)]
    pub days: DayEntries,
}

/// A missing or `null` exceptions entry means no exceptions.
fn null_as_empty<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// Day keys with their range strings, in the order they were given.
///
/// Keys are kept as written. Two keys naming the same day (`"monday"` and
/// `"Monday"`) are both kept; the later one wins when the schedule is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayEntries(Vec<(String, Vec<String>)>);

impl DayEntries {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ranges for `key`, moving it after every other entry.
    pub fn insert(&mut self, key: String, ranges: Vec<String>) {
        self.0.retain(|(existing, _)| *existing != key);
        self.0.push((key, ranges));
    }

    /// Ranges of the last entry written exactly as `key`.
    pub fn get(&self, key: &str) -> Option<&Vec<String>> {
        self.0
            .iter()
            .rev()
            .find(|(existing, _)| existing == key)
            .map(|(_, ranges)| ranges)
    }

    /// Returns true if an entry is written exactly as `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the entries in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, (String, Vec<String>)> {
        self.0.iter()
    }
}

impl FromIterator<(String, Vec<String>)> for DayEntries {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut entries = Self::new();
        for (key, ranges) in iter {
            entries.insert(key, ranges);
        }
        entries
    }
}

impl<'a> IntoIterator for &'a DayEntries {
    type Item = &'a (String, Vec<String>);
    type IntoIter = std::slice::Iter<'a, (String, Vec<String>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for DayEntries {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, ranges) in &self.0 {
            map.serialize_entry(key, ranges)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DayEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = DayEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of day names to lists of time ranges")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<DayEntries, A::Error> {
                // Pushed rather than inserted so repeated keys keep input order.
                let mut entries = Vec::new();
                while let Some(entry) = access.next_entry::<String, Vec<String>>()? {
                    entries.push(entry);
                }
                Ok(DayEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl ScheduleConfig {
    /// Creates an empty configuration (closed every day).
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decodes a configuration from a JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Encodes the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sets the ranges for a day.
    pub fn with_day<I, S>(mut self, day: impl Into<String>, ranges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.days
            .insert(day.into(), ranges.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the ranges for a specific date.
    pub fn with_exception<I, S>(mut self, date: impl Into<String>, ranges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exceptions
            .insert(date.into(), ranges.into_iter().map(Into::into).collect());
        self
    }
}
