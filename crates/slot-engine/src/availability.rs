//! Day-by-day bookable slot computation for a teacher.
//!
//! Expands the teacher's recurring weekly windows over a date range,
//! subtracts the hours occupied by blocking lessons, and returns the
//! remaining 1-hour start slots. Each slot carries an advisory flag for
//! whether the following hour is also free inside the same window.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::lesson::BookedInterval;
use crate::schedule::{RecurringWindow, TeacherId};

/// A single bookable 1-hour start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub start: DateTime<Utc>,
    /// Whether the next hour is also free within the same window. This is
    /// an advisory hint and intentionally conservative: it does not attempt
    /// the cross-window stitching that [`crate::validator::validate`]
    /// applies at acceptance time, so it can under-report 2-hour slots that
    /// a validation would actually accept.
    pub can_book_2_hours: bool,
}

/// Compute the bookable slots for `teacher_id` on every date in
/// `[date_from, date_to]` inclusive.
///
/// Slots already occupied by blocking lessons or not strictly after `now`
/// are withheld. Dates with no offered slot are omitted from the map
/// entirely. Within a date, slots ascend by start time. The computation is
/// pure: identical inputs and `now` yield an identical map.
pub fn compute_availability(
    teacher_id: TeacherId,
    date_from: NaiveDate,
    date_to: NaiveDate,
    windows: &[RecurringWindow],
    booked: &[BookedInterval],
    now: DateTime<Utc>,
) -> BTreeMap<NaiveDate, Vec<AvailabilitySlot>> {
    let occupied = occupied_hours(teacher_id, booked);

    let mut schedule: Vec<&RecurringWindow> = windows
        .iter()
        .filter(|w| w.teacher_id == teacher_id)
        .collect();
    schedule.sort_by_key(|w| (w.weekday.num_days_from_monday(), w.start_time));

    let mut availability = BTreeMap::new();
    let mut date = date_from;
    while date <= date_to {
        let mut daily_slots = Vec::new();
        for window in schedule.iter().filter(|w| w.weekday == date.weekday()) {
            let window_end = date.and_time(window.end_time).and_utc();
            let mut cursor = date.and_time(window.start_time).and_utc();
            while cursor < window_end {
                if !occupied.contains(&cursor) && cursor > now {
                    let next = cursor + Duration::hours(1);
                    let can_book_2_hours = next < window_end && !occupied.contains(&next);
                    daily_slots.push(AvailabilitySlot {
                        start: cursor,
                        can_book_2_hours,
                    });
                }
                cursor += Duration::hours(1);
            }
        }
        if !daily_slots.is_empty() {
            availability.insert(date, daily_slots);
        }
        date += Duration::days(1);
    }

    availability
}

/// Materialize the hour-start timestamps occupied by blocking lessons.
///
/// Each lesson contributes every hour step from its start up to (but not
/// including) its effective end; a lesson without an explicit end occupies
/// exactly its start hour.
fn occupied_hours(teacher_id: TeacherId, booked: &[BookedInterval]) -> HashSet<DateTime<Utc>> {
    let mut occupied = HashSet::new();
    for lesson in booked
        .iter()
        .filter(|l| l.teacher_id == teacher_id && l.status.is_blocking())
    {
        let end = lesson.effective_end();
        let mut cursor = lesson.start;
        while cursor < end {
            occupied.insert(cursor);
            cursor += Duration::hours(1);
        }
    }
    occupied
}
