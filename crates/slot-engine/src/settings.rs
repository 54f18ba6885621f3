//! Stored booking settings and their resolution into a [`WorkingHoursConfig`].
//!
//! Every query resolves its configuration through [`resolve_config`], so there is
//! exactly one place that decides what "no settings stored yet" means: the
//! canonical default record from [`WorkingHoursConfig::default`].

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{parse_time_of_day, WorkingHoursConfig};
use crate::error::{Result, SlotError};

/// The settings record as the settings store keeps it.
///
/// Missing fields fall back to the canonical defaults, so a partially filled
/// record (e.g. only `meetingDuration`) is valid input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Start of the working day, `"HH:MM"`.
    pub working_hours_start: String,
    /// End of the working day, `"HH:MM"`.
    pub working_hours_end: String,
    /// Meeting length in minutes.
    pub meeting_duration: u32,
    /// Idle minutes between two consecutive meetings.
    pub buffer_time: u32,
    /// Enabled weekdays, 0 = Sunday through 6 = Saturday.
    pub working_days: Vec<u8>,
    /// IANA timezone name the working hours are expressed in.
    pub timezone: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings::from(&WorkingHoursConfig::default())
    }
}

impl From<&WorkingHoursConfig> for Settings {
    fn from(config: &WorkingHoursConfig) -> Self {
        Self {
            working_hours_start: config.start.format("%H:%M").to_string(),
            working_hours_end: config.end.format("%H:%M").to_string(),
            meeting_duration: config.meeting_duration_minutes,
            buffer_time: config.buffer_minutes,
            working_days: config.working_days.iter().copied().collect(),
            timezone: config.timezone.name().to_string(),
        }
    }
}

impl Settings {
    /// Validate and convert this record into a [`WorkingHoursConfig`].
    ///
    /// # Errors
    /// - `SlotError::InvalidTime` if either working-hours bound is not `"HH:MM"`.
    /// - `SlotError::InvalidTimezone` if `timezone` is not an IANA identifier.
    /// - `SlotError::InvalidConfiguration` if a working day index is above 6.
    ///
    /// An inverted window or a zero meeting duration is accepted; such a config
    /// has no capacity and produces no slots.
    pub fn to_config(&self) -> Result<WorkingHoursConfig> {
        let start = parse_time_of_day(&self.working_hours_start)?;
        let end = parse_time_of_day(&self.working_hours_end)?;

        let timezone: Tz = self
            .timezone
            .parse()
            .map_err(|_| SlotError::InvalidTimezone(self.timezone.clone()))?;

        if let Some(bad) = self.working_days.iter().find(|&&day| day > 6) {
            return Err(SlotError::InvalidConfiguration(format!(
                "working day index {} is out of range 0..=6",
                bad
            )));
        }

        let config = WorkingHoursConfig {
            start,
            end,
            meeting_duration_minutes: self.meeting_duration,
            buffer_minutes: self.buffer_time,
            working_days: self.working_days.iter().copied().collect(),
            timezone,
        };

        if !config.has_capacity() {
            warn!(
                start = %self.working_hours_start,
                end = %self.working_hours_end,
                meeting_duration = self.meeting_duration,
                "settings describe an empty working window, no slots will be offered"
            );
        }

        Ok(config)
    }
}

/// Resolve the effective configuration for a request.
///
/// Uses the stored record when there is one and the canonical default record
/// otherwise.
pub fn resolve_config(stored: Option<&Settings>) -> Result<WorkingHoursConfig> {
    match stored {
        Some(settings) => settings.to_config(),
        None => {
            info!("no stored settings, using default working hours");
            Ok(WorkingHoursConfig::default())
        }
    }
}
