//! Booked lessons and booking requests.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};

use crate::error::{RejectionReason, ScheduleError};
use crate::schedule::TeacherId;

/// Lifecycle status of a lesson.
///
/// Only `Pending` and `Approved` lessons occupy a time slot; cancelled and
/// completed lessons are invisible to the booking checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonStatus {
    /// Awaiting confirmation. Stored as `"void"` on the wire.
    Pending,
    Approved,
    CancelledByTeacher,
    CancelledByStudent,
    Done,
}

impl LessonStatus {
    /// Whether a lesson in this status blocks other bookings from
    /// overlapping its time span.
    pub fn is_blocking(self) -> bool {
        matches!(self, LessonStatus::Pending | LessonStatus::Approved)
    }

    /// Whether the lesson has been held and may be rated by its student.
    pub fn is_reviewable(self) -> bool {
        self == LessonStatus::Done
    }
}

impl FromStr for LessonStatus {
    type Err = ScheduleError;

    /// Parse the wire name. `"pending"` is accepted as an alias of the
    /// stored `"void"` value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "void" | "pending" => Ok(LessonStatus::Pending),
            "approved" => Ok(LessonStatus::Approved),
            "cancelled_by_teacher" => Ok(LessonStatus::CancelledByTeacher),
            "cancelled_by_student" => Ok(LessonStatus::CancelledByStudent),
            "done" => Ok(LessonStatus::Done),
            other => Err(ScheduleError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LessonStatus::Pending => "void",
            LessonStatus::Approved => "approved",
            LessonStatus::CancelledByTeacher => "cancelled_by_teacher",
            LessonStatus::CancelledByStudent => "cancelled_by_student",
            LessonStatus::Done => "done",
        };
        f.write_str(name)
    }
}

/// An existing lesson's absolute time span.
///
/// `end` may be absent, in which case the lesson spans exactly one hour
/// from `start`. When present, `end > start` is a precondition owned by
/// the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookedInterval {
    pub teacher_id: TeacherId,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub status: LessonStatus,
}

impl BookedInterval {
    /// The interval's end, defaulting to one hour after `start`.
    pub fn effective_end(&self) -> DateTime<Utc> {
        self.end.unwrap_or(self.start + Duration::hours(1))
    }

    /// How long the lesson runs.
    pub fn duration(&self) -> Duration {
        self.effective_end() - self.start
    }

    /// Whether the lesson's span has fully elapsed. The sweep that retires
    /// stale pending/approved lessons to `Done` keys off this.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.effective_end()
    }

    /// Half-open overlap test against `[start, end)`.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && self.effective_end() > start
    }
}

/// Allowed lesson lengths. Other durations are unrepresentable; the
/// boundary maps raw numbers through [`TryFrom<u8>`] and surfaces
/// [`RejectionReason::InvalidDuration`] for anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonDuration {
    OneHour,
    TwoHours,
}

impl LessonDuration {
    pub fn hours(self) -> i64 {
        match self {
            LessonDuration::OneHour => 1,
            LessonDuration::TwoHours => 2,
        }
    }

    pub fn as_duration(self) -> Duration {
        Duration::hours(self.hours())
    }
}

impl TryFrom<u8> for LessonDuration {
    type Error = RejectionReason;

    fn try_from(hours: u8) -> Result<Self, Self::Error> {
        match hours {
            1 => Ok(LessonDuration::OneHour),
            2 => Ok(LessonDuration::TwoHours),
            other => Err(RejectionReason::InvalidDuration(other)),
        }
    }
}

/// A proposed booking, not yet persisted. Validity is computed, not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRequest {
    pub teacher_id: TeacherId,
    pub start: DateTime<Utc>,
    pub duration: LessonDuration,
}
