//! Error types for slot-engine operations.

use chrono::NaiveTime;
use thiserror::Error;

/// Why a booking request was rejected.
///
/// Every variant is an expected, caller-recoverable outcome. The validator
/// returns the first applicable reason in a fixed check order; it never
/// aggregates multiple violations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    #[error("cannot schedule a lesson in the past")]
    PastStart,

    #[error("lessons must start exactly on the hour")]
    MisalignedStart,

    #[error("lesson duration must be 1 or 2 hours, got {0}")]
    InvalidDuration(u8),

    #[error("the selected time slot overlaps with another lesson for this teacher")]
    SlotTaken,

    #[error("the selected time slot does not fit within the teacher's available schedule")]
    OutsideAvailability,
}

/// Errors raised when constructing schedule data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("start time {start} must be earlier than end time {end}")]
    EmptyWindow { start: NaiveTime, end: NaiveTime },

    #[error("unknown lesson status: {0:?}")]
    UnknownStatus(String),
}
