//! Recurring weekly schedule data for teachers.
//!
//! A teacher's availability is a set of [`RecurringWindow`]s, each keyed by
//! weekday with time-of-day bounds. A window never wraps within a single
//! record: availability that spans midnight is stored as two records, one
//! ending at [`day_end`] (23:59:59) and one starting at midnight on the
//! next weekday. This keeps every interval comparison monotonic.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Opaque teacher identifier. The engine only ever compares it for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeacherId(pub u64);

/// The last representable second of a day, used as the end bound of the
/// first half of a midnight-spanning availability block.
pub fn day_end() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).expect("23:59:59 is a valid time of day")
}

/// One contiguous weekly availability interval for a teacher.
///
/// Invariant: `start_time < end_time` strictly. Overlap-freedom across a
/// teacher's windows on the same weekday is a precondition owned by the
/// storage layer, not checked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringWindow {
    pub teacher_id: TeacherId,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl RecurringWindow {
    /// Build a window, rejecting empty or inverted time bounds.
    pub fn new(
        teacher_id: TeacherId,
        weekday: Weekday,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Self, ScheduleError> {
        if start_time >= end_time {
            return Err(ScheduleError::EmptyWindow {
                start: start_time,
                end: end_time,
            });
        }
        Ok(Self {
            teacher_id,
            weekday,
            start_time,
            end_time,
        })
    }

    /// Whether `[from, to]` (times of day, inclusive bounds) lies inside
    /// this window.
    pub fn covers(&self, from: NaiveTime, to: NaiveTime) -> bool {
        self.start_time <= from && self.end_time >= to
    }

    /// Whether this window is the first half of a midnight-spanning block:
    /// it reaches `from` and runs through the end of the day.
    pub fn reaches_day_end(&self, from: NaiveTime) -> bool {
        self.start_time <= from && self.end_time == day_end()
    }

    /// Whether this window is the second half of a midnight-spanning block:
    /// it starts at midnight and runs through at least `to`.
    pub fn starts_at_midnight(&self, to: NaiveTime) -> bool {
        self.start_time == NaiveTime::MIN && self.end_time >= to
    }
}
