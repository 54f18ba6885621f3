//! Working-hours configuration consumed by the slot generator and the classifier.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst;
use crate::error::{Result, SlotError};

const DEFAULT_START: NaiveTime = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
const DEFAULT_END: NaiveTime = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
const DEFAULT_MEETING_DURATION_MINUTES: u32 = 60;
const DEFAULT_BUFFER_MINUTES: u32 = 15;
/// Monday through Friday, with 0 = Sunday.
const DEFAULT_WORKING_DAYS: [u8; 5] = [1, 2, 3, 4, 5];

/// Daily working hours and slot geometry for one calendar owner.
///
/// `start` and `end` are wall-clock times in `timezone`. Working days are weekday
/// indices with 0 = Sunday through 6 = Saturday.
///
/// A config with `start >= end` or a zero meeting duration is representable; it
/// simply has no capacity and yields no slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHoursConfig {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    pub meeting_duration_minutes: u32,
    pub buffer_minutes: u32,
    pub working_days: BTreeSet<u8>,
    pub timezone: Tz,
}

impl Default for WorkingHoursConfig {
    /// The canonical default record: 09:00-18:00 UTC, Monday to Friday,
    /// 60-minute meetings separated by 15 minutes.
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            end: DEFAULT_END,
            meeting_duration_minutes: DEFAULT_MEETING_DURATION_MINUTES,
            buffer_minutes: DEFAULT_BUFFER_MINUTES,
            working_days: DEFAULT_WORKING_DAYS.into_iter().collect(),
            timezone: chrono_tz::UTC,
        }
    }
}

impl WorkingHoursConfig {
    /// Whether this config can produce at least a non-empty working window.
    pub fn has_capacity(&self) -> bool {
        self.start < self.end && self.meeting_duration_minutes > 0
    }

    /// Whether `date` falls on one of the configured working days.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        let index = date.weekday().num_days_from_sunday() as u8;
        self.working_days.contains(&index)
    }

    pub fn meeting_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.meeting_duration_minutes))
    }

    /// Distance between the starts of two consecutive slots.
    pub fn step(&self) -> Duration {
        Duration::minutes(i64::from(self.meeting_duration_minutes) + i64::from(self.buffer_minutes))
    }

    /// Absolute start and end anchors of the working window on `date`.
    pub fn working_window(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        (
            dst::resolve_local(&self.timezone, date, self.start),
            dst::resolve_local(&self.timezone, date, self.end),
        )
    }

    /// The calendar date of `instant` in this config's timezone.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.timezone).date_naive()
    }
}

/// Parse an `"HH:MM"` (or `"HH:MM:SS"`) time of day.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| SlotError::InvalidTime(input.to_string()))
}

/// Serde adapter for `"HH:MM"` times of day.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time_of_day(&raw).map_err(serde::de::Error::custom)
    }
}
