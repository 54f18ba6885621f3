//! Slot generation for a single calendar day.
//!
//! A cursor starts at the working window's opening time. Each step proposes the
//! candidate `[cursor, cursor + duration)`; the candidate is emitted if it ends
//! no later than the closing time, then the cursor advances by
//! `duration + buffer`. Generation stops at the first candidate that would run
//! past closing time.
//!
//! Working days are not consulted here, so the same code counts the theoretical
//! capacity of any day.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::booking::BookedInterval;
use crate::config::WorkingHoursConfig;
use crate::conflict::is_available;

/// A bookable meeting window on a specific day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Local time of day of `start_time`, `"HH:MM"`.
    pub label: String,
    pub available: bool,
}

/// Iterator over the candidate `[start, end)` windows of a day.
///
/// Created by [`slot_windows`].
#[derive(Debug, Clone)]
pub struct SlotWindows {
    cursor: Option<DateTime<Utc>>,
    close: DateTime<Utc>,
    duration: Duration,
    step: Duration,
}

impl Iterator for SlotWindows {
    type Item = (DateTime<Utc>, DateTime<Utc>);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.cursor?;
        let end = start.checked_add_signed(self.duration)?;
        if end > self.close {
            self.cursor = None;
            return None;
        }
        self.cursor = start.checked_add_signed(self.step);
        Some((start, end))
    }
}

/// The candidate windows of `date` under `config`, earliest first.
///
/// Empty when the config has no capacity (`start >= end` or a zero duration) or
/// when a single meeting does not fit the window.
pub fn slot_windows(date: NaiveDate, config: &WorkingHoursConfig) -> SlotWindows {
    let (open, close) = config.working_window(date);
    SlotWindows {
        cursor: config.has_capacity().then_some(open),
        close,
        duration: config.meeting_duration(),
        step: config.step(),
    }
}

/// Number of slots `date` offers when nothing is booked.
pub fn count_slots(date: NaiveDate, config: &WorkingHoursConfig) -> usize {
    slot_windows(date, config).count()
}

/// Generate the slots of `date`, marking each one against `booked`.
///
/// `booked` must already be narrowed to the bookings that should block slots on
/// this day. The result is a pure function of the inputs.
pub fn generate_slots(
    date: NaiveDate,
    config: &WorkingHoursConfig,
    booked: &[BookedInterval],
) -> Vec<Slot> {
    let slots: Vec<Slot> = slot_windows(date, config)
        .map(|(start, end)| Slot {
            start_time: start,
            end_time: end,
            label: local_label(start, &config.timezone),
            available: is_available(start, end, booked),
        })
        .collect();

    debug!(
        %date,
        total = slots.len(),
        open = slots.iter().filter(|s| s.available).count(),
        bookings = booked.len(),
        "generated slots"
    );

    slots
}

fn local_label(instant: DateTime<Utc>, tz: &Tz) -> String {
    instant.with_timezone(tz).format("%H:%M").to_string()
}
