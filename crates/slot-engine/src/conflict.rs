//! Interval overlap testing between candidate slots and existing bookings.
//!
//! All intervals are half-open: `[start, end)`. Two intervals overlap when
//! `a.start < b.end && b.start < a.end`, so a booking that ends exactly when a
//! candidate starts (or starts exactly when it ends) is NOT a conflict.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::BookedInterval;
use crate::config::WorkingHoursConfig;
use crate::error::{Result, SlotError};

/// A booking that overlaps a requested interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub booking: BookedInterval,
    pub overlap_minutes: i64,
}

/// Whether `[a_start, a_end)` and `[b_start, b_end)` share at least one instant.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Whether the candidate `[candidate_start, candidate_end)` is free of every booking.
///
/// The caller decides which bookings count (typically pending and confirmed ones
/// on the same day); this function looks at intervals only.
pub fn is_available(
    candidate_start: DateTime<Utc>,
    candidate_end: DateTime<Utc>,
    booked: &[BookedInterval],
) -> bool {
    !booked
        .iter()
        .any(|b| overlaps(candidate_start, candidate_end, b.start_time, b.end_time))
}

/// Find every booking overlapping `[start, end)`, in input order.
///
/// The overlap duration is `min(end, b.end) - max(start, b.start)`.
pub fn find_conflicts(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    booked: &[BookedInterval],
) -> Vec<Conflict> {
    booked
        .iter()
        .filter(|b| overlaps(start, end, b.start_time, b.end_time))
        .map(|b| {
            let overlap_start = start.max(b.start_time);
            let overlap_end = end.min(b.end_time);
            Conflict {
                booking: b.clone(),
                overlap_minutes: (overlap_end - overlap_start).num_minutes(),
            }
        })
        .collect()
}

/// Check a manually requested meeting start before it is persisted.
///
/// The requested meeting lasts `config.meeting_duration_minutes` and must fall on
/// a working day, lie entirely inside the working window of its local date, and
/// not overlap any of `booked`.
///
/// # Errors
/// - `SlotError::NotWorkingDay` if the local date is not a working day.
/// - `SlotError::InvalidDate` if the meeting would end past the last representable instant.
/// - `SlotError::OutsideWorkingHours` if the meeting does not fit the working window.
/// - `SlotError::Conflict` for the first booking the meeting overlaps.
pub fn validate_booking_request(
    start: DateTime<Utc>,
    config: &WorkingHoursConfig,
    booked: &[BookedInterval],
) -> Result<()> {
    let date = config.local_date(start);
    if !config.is_working_day(date) {
        return Err(SlotError::NotWorkingDay(date));
    }

    let end = start
        .checked_add_signed(config.meeting_duration())
        .ok_or_else(|| {
            SlotError::InvalidDate(format!(
                "meeting starting at {} ends past the supported range",
                start
            ))
        })?;
    let (window_start, window_end) = config.working_window(date);
    if !config.has_capacity() || start < window_start || end > window_end {
        return Err(SlotError::OutsideWorkingHours { start, end });
    }

    if let Some(conflict) = find_conflicts(start, end, booked).into_iter().next() {
        return Err(SlotError::Conflict {
            start: conflict.booking.start_time,
            end: conflict.booking.end_time,
            overlap_minutes: conflict.overlap_minutes,
        });
    }

    Ok(())
}
