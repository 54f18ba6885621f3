//! # slot-engine
//!
//! Deterministic appointment slot generation and occupancy classification for
//! meeting-booking systems.
//!
//! Given working hours, a meeting duration, a buffer between meetings and the
//! bookings already made, the engine computes which slots of a day can still be
//! booked and how full the day is. Every computation is a pure function of its
//! inputs: loading settings and bookings is the caller's job.
//!
//! ## Modules
//!
//! - [`config`] — `WorkingHoursConfig`, the validated working-hours value object
//! - [`settings`] — Stored settings record and the single default-resolution path
//! - [`booking`] — Booked intervals and booking status
//! - [`slots`] — Slot generation for one day
//! - [`conflict`] — Half-open interval overlap and booking-request validation
//! - [`occupancy`] — Day occupancy rate and status classification
//! - [`query`] — Request-level operations combining the above
//! - [`dst`] — Local wall-clock resolution across DST transitions
//! - [`error`] — Error types

pub mod booking;
pub mod config;
pub mod conflict;
pub mod dst;
pub mod error;
pub mod occupancy;
pub mod query;
pub mod settings;
pub mod slots;

pub use booking::{BookedInterval, BookingStatus};
pub use config::WorkingHoursConfig;
pub use conflict::{find_conflicts, is_available, overlaps, validate_booking_request, Conflict};
pub use error::SlotError;
pub use occupancy::{classify_day, DayOccupancy, OccupancyStatus};
pub use query::{available_slots, check_booking, day_status, AvailableSlots};
pub use settings::{resolve_config, Settings};
pub use slots::{count_slots, generate_slots, slot_windows, Slot};
