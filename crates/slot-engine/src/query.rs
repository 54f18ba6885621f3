//! Request-level operations: what a booking page handler calls.
//!
//! Each query resolves the effective configuration (stored settings or the
//! canonical defaults), narrows the supplied bookings to those that hold
//! capacity on the requested day, and runs the matching core computation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::BookedInterval;
use crate::config::WorkingHoursConfig;
use crate::conflict::{overlaps, validate_booking_request};
use crate::dst;
use crate::error::{Result, SlotError};
use crate::occupancy::{classify_day, DayOccupancy};
use crate::settings::{resolve_config, Settings};
use crate::slots::{generate_slots, Slot};

/// Response of [`available_slots`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlots {
    /// Every slot of the day, each flagged available or not.
    pub available_slots: Vec<Slot>,
    /// The configuration the slots were generated with.
    pub effective_config: WorkingHoursConfig,
}

/// Parse a `YYYY-MM-DD` query date.
///
/// # Errors
/// Returns `SlotError::InvalidDate` for empty or malformed input.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SlotError::InvalidDate("date is required".to_string()));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|e| SlotError::InvalidDate(format!("'{}': {}", input, e)))
}

/// Parse a requested meeting start.
///
/// Accepts RFC 3339 (e.g. "2026-03-16T09:00:00+01:00") and naive
/// "2026-03-16T09:00:00", which is interpreted as UTC.
///
/// # Errors
/// Returns `SlotError::InvalidDate` if neither form parses.
pub fn parse_instant(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| SlotError::InvalidDate(format!("'{}': {}", input, e)))
}

/// Keep the bookings that hold capacity and intersect the local day `date`.
pub fn bookings_for_day(
    date: NaiveDate,
    config: &WorkingHoursConfig,
    bookings: &[BookedInterval],
) -> Vec<BookedInterval> {
    let (day_start, day_end) = dst::day_span(&config.timezone, date);
    bookings
        .iter()
        .filter(|b| b.status.blocks_capacity())
        .filter(|b| overlaps(b.start_time, b.end_time, day_start, day_end))
        .cloned()
        .collect()
}

/// All slots of `date` with their availability, plus the effective config.
pub fn available_slots(
    date: NaiveDate,
    settings: Option<&Settings>,
    bookings: &[BookedInterval],
) -> Result<AvailableSlots> {
    let config = resolve_config(settings)?;
    let relevant = bookings_for_day(date, &config, bookings);
    let slots = generate_slots(date, &config, &relevant);
    Ok(AvailableSlots {
        available_slots: slots,
        effective_config: config,
    })
}

/// Occupancy summary of `date`.
pub fn day_status(
    date: NaiveDate,
    settings: Option<&Settings>,
    bookings: &[BookedInterval],
) -> Result<DayOccupancy> {
    let config = resolve_config(settings)?;
    let relevant = bookings_for_day(date, &config, bookings);
    Ok(classify_day(date, &config, &relevant))
}

/// Validate a requested meeting start against working hours and bookings.
///
/// # Errors
/// See [`validate_booking_request`]; settings errors are propagated as well.
pub fn check_booking(
    start: DateTime<Utc>,
    settings: Option<&Settings>,
    bookings: &[BookedInterval],
) -> Result<()> {
    let config = resolve_config(settings)?;
    let relevant = bookings_for_day(config.local_date(start), &config, bookings);
    validate_booking_request(start, &config, &relevant)
}
