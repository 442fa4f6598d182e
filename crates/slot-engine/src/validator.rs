//! Booking validation -- decides whether a proposed lesson may be accepted.
//!
//! Checks run in a fixed order and the first failure wins: start must be in
//! the future, start must sit on an hour boundary, the requested span must
//! be free of blocking lessons, and the span must fit inside the teacher's
//! recurring weekly schedule. Spans that cross midnight are covered by a
//! pair of windows bracketing the day boundary.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RejectionReason;
use crate::lesson::{BookedInterval, BookingRequest, LessonDuration};
use crate::schedule::{RecurringWindow, TeacherId};

/// A validated booking, ready for the caller to persist as a new pending
/// lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedSlot {
    pub teacher_id: TeacherId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Validate a booking request against the teacher's recurring windows and
/// already-booked lessons.
///
/// Windows and intervals belonging to other teachers are ignored. The
/// function is pure: it reads a snapshot and renders a verdict, nothing
/// more. Preventing a concurrent overlapping acceptance between this check
/// and the subsequent write is the caller's obligation -- wrap the
/// read-check-write in a serializable transaction or an equivalent
/// per-teacher mutual-exclusion scope.
///
/// # Errors
///
/// Returns the first applicable [`RejectionReason`]:
/// - [`RejectionReason::PastStart`] if `start` is not strictly after `now`
/// - [`RejectionReason::MisalignedStart`] if `start` is not on the hour
/// - [`RejectionReason::SlotTaken`] if the span overlaps a blocking lesson
/// - [`RejectionReason::OutsideAvailability`] if the span is not covered by
///   the teacher's schedule
pub fn validate(
    request: &BookingRequest,
    windows: &[RecurringWindow],
    booked: &[BookedInterval],
    now: DateTime<Utc>,
) -> Result<ApprovedSlot, RejectionReason> {
    let start = request.start;

    if start <= now {
        return Err(RejectionReason::PastStart);
    }
    if start.minute() != 0 || start.second() != 0 || start.nanosecond() != 0 {
        return Err(RejectionReason::MisalignedStart);
    }

    let end = start + request.duration.as_duration();

    let taken = booked
        .iter()
        .filter(|lesson| lesson.teacher_id == request.teacher_id && lesson.status.is_blocking())
        .any(|lesson| lesson.overlaps(start, end));
    if taken {
        return Err(RejectionReason::SlotTaken);
    }

    if !schedule_covers(request, windows, start, end) {
        return Err(RejectionReason::OutsideAvailability);
    }

    Ok(ApprovedSlot {
        teacher_id: request.teacher_id,
        start,
        end,
    })
}

/// Whether the teacher's recurring windows cover `[start, end]`.
///
/// The span crosses midnight exactly when the end time-of-day is not after
/// the start time-of-day; with hour-aligned starts and 1-2 hour durations
/// that is the only way the comparison can come out non-increasing.
fn schedule_covers(
    request: &BookingRequest,
    windows: &[RecurringWindow],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> bool {
    let start_tod = start.time();
    let end_tod = end.time();

    let on_day = |weekday| {
        windows
            .iter()
            .filter(move |w| w.teacher_id == request.teacher_id && w.weekday == weekday)
    };

    if end_tod <= start_tod {
        // Crossing midnight: one window must run from the start through
        // 23:59:59, and a second on the next weekday must run from 00:00:00
        // through the end.
        let first_half = on_day(start.weekday()).any(|w| w.reaches_day_end(start_tod));
        let second_half = on_day(start.weekday().succ()).any(|w| w.starts_at_midnight(end_tod));
        return first_half && second_half;
    }

    if on_day(start.weekday()).any(|w| w.covers(start_tod, end_tod)) {
        return true;
    }

    // A two-hour span may straddle two back-to-back windows stored as
    // separate records; no window merging is required upstream.
    if request.duration == LessonDuration::TwoHours {
        let mid_tod = (start + chrono::Duration::hours(1)).time();
        let first_hour = on_day(start.weekday()).any(|w| w.covers(start_tod, mid_tod));
        let second_hour = on_day(start.weekday()).any(|w| w.covers(mid_tod, end_tod));
        return first_hour && second_hour;
    }

    false
}
