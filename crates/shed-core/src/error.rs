//! Error taxonomy for planner operations.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors surfaced by the allocation engine, line operations, and the
/// report aggregator.
///
/// Every variant is an invalid-input rejection: the operation that returned
/// it has not mutated any state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// The requested reduction was zero, negative, or not a finite number.
    #[error("requested reduction must be positive, got {0} MW")]
    NonPositiveReduction(f64),

    /// A report range had its start after its end.
    #[error("report range start {start} is after end {end}")]
    RangeStartAfterEnd { start: NaiveDate, end: NaiveDate },

    /// A monthly report was requested for a month that does not exist.
    #[error("invalid month {month} of year {year}")]
    InvalidMonth { year: i32, month: u32 },

    /// The referenced line id is not part of the fleet.
    #[error("no line with id {0}")]
    UnknownLine(u32),

    /// A capacity update was not a positive finite number of megawatts.
    #[error("line capacity must be positive and finite, got {0} MW")]
    InvalidCapacity(f64),

    /// A time-slot string was neither "morning" nor "evening".
    #[error("unknown time slot: {0}")]
    UnknownTimeSlot(String),

    /// A group tag was neither 0 nor 1.
    #[error("group must be 0 or 1, got {0}")]
    InvalidGroup(u8),
}
