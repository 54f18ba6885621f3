//! Aggregate occupancy classification for a single day.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::booking::{BookedInterval, BookingStatus};
use crate::config::WorkingHoursConfig;
use crate::slots::count_slots;

/// Qualitative occupancy of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupancyStatus {
    /// The day is not one of the configured working days.
    NonWorking,
    /// Nothing booked.
    Available,
    /// Some bookings, all of them awaiting confirmation.
    Pending,
    /// Some bookings, all of them confirmed.
    Partial,
    /// Some bookings, both confirmed and pending.
    Mixed,
    /// At least 75% of capacity booked.
    Busy,
    /// Capacity exhausted.
    Full,
}

impl OccupancyStatus {
    /// Classify a working day from its occupation rate and booking mix.
    ///
    /// Rows are evaluated top to bottom and the first match wins, so the rate
    /// thresholds take precedence over the confirmed/pending mix.
    pub fn classify(rate_percent: u32, has_confirmed: bool, has_pending: bool) -> Self {
        match (rate_percent, has_confirmed, has_pending) {
            (rate, _, _) if rate >= 100 => OccupancyStatus::Full,
            (rate, _, _) if rate >= 75 => OccupancyStatus::Busy,
            (0, _, _) => OccupancyStatus::Available,
            (_, true, true) => OccupancyStatus::Mixed,
            (_, true, false) => OccupancyStatus::Partial,
            (_, false, true) => OccupancyStatus::Pending,
            (_, false, false) => OccupancyStatus::Available,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OccupancyStatus::NonWorking => "non_working",
            OccupancyStatus::Available => "available",
            OccupancyStatus::Pending => "pending",
            OccupancyStatus::Partial => "partial",
            OccupancyStatus::Mixed => "mixed",
            OccupancyStatus::Busy => "busy",
            OccupancyStatus::Full => "full",
        }
    }
}

impl fmt::Display for OccupancyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Occupancy summary of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOccupancy {
    pub date: NaiveDate,
    pub total_slot_count: usize,
    pub occupied_slot_count: usize,
    pub available_slot_count: usize,
    /// `round(100 * occupied / total)` capped at 100, 0 when the day has no capacity.
    pub occupation_rate_percent: u32,
    pub status: OccupancyStatus,
    pub has_pending: bool,
    pub has_confirmed: bool,
    pub is_working_day: bool,
}

impl DayOccupancy {
    fn non_working(date: NaiveDate) -> Self {
        Self {
            date,
            total_slot_count: 0,
            occupied_slot_count: 0,
            available_slot_count: 0,
            occupation_rate_percent: 0,
            status: OccupancyStatus::NonWorking,
            has_pending: false,
            has_confirmed: false,
            is_working_day: false,
        }
    }
}

/// Classify how booked `date` is.
///
/// Each booking counts as one occupied slot; bookings are not re-matched
/// against generated slots. `booked` should hold the bookings of `date` that
/// hold capacity (pending and confirmed).
pub fn classify_day(
    date: NaiveDate,
    config: &WorkingHoursConfig,
    booked: &[BookedInterval],
) -> DayOccupancy {
    if !config.is_working_day(date) {
        debug!(%date, "not a working day");
        return DayOccupancy::non_working(date);
    }

    let total = count_slots(date, config);
    let occupied = booked.len();

    let (has_pending, has_confirmed) =
        booked
            .iter()
            .fold((false, false), |(pending, confirmed), b| match b.status {
                BookingStatus::Pending => (true, confirmed),
                BookingStatus::Confirmed => (pending, true),
                BookingStatus::Cancelled | BookingStatus::Completed => (pending, confirmed),
            });

    let rate = occupation_rate(occupied, total);
    let status = OccupancyStatus::classify(rate, has_confirmed, has_pending);

    debug!(%date, total, occupied, rate, %status, "classified day");

    DayOccupancy {
        date,
        total_slot_count: total,
        occupied_slot_count: occupied,
        available_slot_count: total.saturating_sub(occupied),
        occupation_rate_percent: rate.min(100),
        status,
        has_pending,
        has_confirmed,
        is_working_day: true,
    }
}

/// Percentage of `total` taken by `occupied`, rounded half up.
fn occupation_rate(occupied: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let occupied = occupied as u128;
    let total = total as u128;
    let rounded = (200 * occupied + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}
