//! WASM bindings for slot-engine.
//!
//! Exposes booking validation and availability computation to JavaScript
//! via `wasm-bindgen`. All complex values cross the boundary as JSON
//! strings: the caller ships a snapshot of the teacher's schedule and
//! booked lessons, and gets back either an approved interval or a
//! date-keyed slot listing.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use slot_engine::{
    compute_availability, validate, BookedInterval, BookingRequest, LessonDuration, LessonStatus,
    RecurringWindow, TeacherId,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Snapshot of one teacher's calendar as supplied by the caller.
#[derive(Deserialize)]
struct SnapshotInput {
    #[serde(default)]
    schedule: Vec<WindowInput>,
    #[serde(default)]
    lessons: Vec<LessonInput>,
}

#[derive(Deserialize)]
struct WindowInput {
    teacher_id: u64,
    weekday: String,
    start_time: NaiveTime,
    end_time: NaiveTime,
}

#[derive(Deserialize)]
struct LessonInput {
    teacher_id: u64,
    start_time: String,
    #[serde(default)]
    end_time: Option<String>,
    status: String,
}

#[derive(Serialize)]
struct ApprovedSlotDto {
    teacher_id: u64,
    start_time: String,
    end_time: String,
}

#[derive(Serialize)]
struct SlotDto {
    start_time: String,
    can_book_2_hours: bool,
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts both RFC 3339 (with timezone offset, e.g., "2026-08-10T09:00:00Z")
/// and naive local time (e.g., "2026-08-10T09:00:00"), which is interpreted
/// as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, JsValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    s.parse()
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

/// Convert a snapshot JSON document into engine windows and lessons.
fn parse_snapshot(json: &str) -> Result<(Vec<RecurringWindow>, Vec<BookedInterval>), JsValue> {
    let input: SnapshotInput = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid snapshot JSON: {}", e)))?;

    let windows = input
        .schedule
        .into_iter()
        .map(|w| {
            let weekday: Weekday = w
                .weekday
                .parse()
                .map_err(|_| JsValue::from_str(&format!("Invalid weekday '{}'", w.weekday)))?;
            RecurringWindow::new(TeacherId(w.teacher_id), weekday, w.start_time, w.end_time)
                .map_err(|e| JsValue::from_str(&e.to_string()))
        })
        .collect::<Result<Vec<_>, JsValue>>()?;

    let lessons = input
        .lessons
        .into_iter()
        .map(|l| {
            let status: LessonStatus = l
                .status
                .parse()
                .map_err(|e: slot_engine::ScheduleError| JsValue::from_str(&e.to_string()))?;
            let start = parse_datetime(&l.start_time)?;
            let end = l.end_time.as_deref().map(parse_datetime).transpose()?;
            Ok(BookedInterval {
                teacher_id: TeacherId(l.teacher_id),
                start,
                end,
                status,
            })
        })
        .collect::<Result<Vec<_>, JsValue>>()?;

    Ok((windows, lessons))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Validate a proposed booking against a snapshot of the teacher's calendar.
///
/// Returns a JSON string with the approved interval
/// (`{teacher_id, start_time, end_time}`) or an error string carrying the
/// rejection reason.
///
/// # Arguments
/// - `snapshot_json` -- `{schedule: [...], lessons: [...]}` document
/// - `teacher_id` -- the teacher being booked
/// - `start` -- requested start, ISO 8601
/// - `hours` -- requested duration, 1 or 2
/// - `now` -- the caller's current time, ISO 8601
#[wasm_bindgen(js_name = "checkBooking")]
pub fn check_booking(
    snapshot_json: &str,
    teacher_id: u64,
    start: &str,
    hours: u8,
    now: &str,
) -> Result<String, JsValue> {
    let (windows, lessons) = parse_snapshot(snapshot_json)?;
    let duration =
        LessonDuration::try_from(hours).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let request = BookingRequest {
        teacher_id: TeacherId(teacher_id),
        start: parse_datetime(start)?,
        duration,
    };

    let approved = validate(&request, &windows, &lessons, parse_datetime(now)?)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let dto = ApprovedSlotDto {
        teacher_id: approved.teacher_id.0,
        start_time: approved.start.to_rfc3339(),
        end_time: approved.end.to_rfc3339(),
    };
    serde_json::to_string(&dto)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Compute the bookable slots for a teacher over an inclusive date range.
///
/// Returns a JSON string mapping ISO dates to ordered arrays of
/// `{start_time, can_book_2_hours}` objects; dates with no open slot are
/// omitted.
#[wasm_bindgen(js_name = "computeAvailability")]
pub fn compute_availability_json(
    snapshot_json: &str,
    teacher_id: u64,
    date_from: &str,
    date_to: &str,
    now: &str,
) -> Result<String, JsValue> {
    let (windows, lessons) = parse_snapshot(snapshot_json)?;

    let availability = compute_availability(
        TeacherId(teacher_id),
        parse_date(date_from)?,
        parse_date(date_to)?,
        &windows,
        &lessons,
        parse_datetime(now)?,
    );

    let mut map = serde_json::Map::new();
    for (date, slots) in availability {
        let slots: Vec<SlotDto> = slots
            .into_iter()
            .map(|s| SlotDto {
                start_time: s.start.to_rfc3339(),
                can_book_2_hours: s.can_book_2_hours,
            })
            .collect();
        let value = serde_json::to_value(slots)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))?;
        map.insert(date.to_string(), value);
    }

    serde_json::to_string(&serde_json::Value::Object(map))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
