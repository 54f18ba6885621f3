//! Error types for slot-engine operations.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("{0} is not a working day")]
    NotWorkingDay(NaiveDate),

    #[error("Requested time {start} - {end} is outside working hours")]
    OutsideWorkingHours {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The requested window overlaps an existing booking.
    #[error("Requested time conflicts with booking {start} - {end} ({overlap_minutes} min overlap)")]
    Conflict {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        overlap_minutes: i64,
    },
}

pub type Result<T> = std::result::Result<T, SlotError>;
