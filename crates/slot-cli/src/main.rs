//! `lessonslot` CLI — check bookings and list teacher availability from a
//! calendar snapshot.
//!
//! ## Usage
//!
//! ```sh
//! # List open slots for teacher 1 over the default 30-day horizon
//! lessonslot availability --teacher 1 -i snapshot.json
//!
//! # List open slots for an explicit date range, snapshot via stdin
//! cat snapshot.json | lessonslot availability --teacher 1 \
//!   --from 2026-08-10 --to 2026-08-16
//!
//! # Validate a proposed booking (exit 0 on acceptance)
//! lessonslot check --teacher 1 --start 2026-08-10T09:00:00Z --hours 2 \
//!   -i snapshot.json
//! ```
//!
//! The snapshot is a JSON document with a `schedule` array of recurring
//! weekly windows and a `lessons` array of booked lessons; see the fixture
//! under `tests/fixtures/` for the exact shape.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use slot_engine::{
    compute_availability, validate, BookedInterval, BookingRequest, LessonDuration, LessonStatus,
    RecurringWindow, TeacherId,
};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "lessonslot",
    version,
    about = "Lesson booking validation and teacher availability"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List bookable 1-hour start slots for a teacher over a date range
    Availability {
        /// Snapshot file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Teacher to compute availability for
        #[arg(long)]
        teacher: u64,
        /// First date of the range, YYYY-MM-DD (defaults to today, UTC)
        #[arg(long)]
        from: Option<String>,
        /// Last date of the range, YYYY-MM-DD (defaults to today + 30 days)
        #[arg(long)]
        to: Option<String>,
        /// Pin the clock to an ISO 8601 instant (defaults to the current UTC time)
        #[arg(long)]
        now: Option<String>,
    },
    /// Validate a proposed booking against the snapshot
    Check {
        /// Snapshot file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Teacher being booked
        #[arg(long)]
        teacher: u64,
        /// Requested start, ISO 8601, exactly on the hour
        #[arg(long)]
        start: String,
        /// Requested duration in hours (1 or 2)
        #[arg(long, default_value_t = 1)]
        hours: u8,
        /// Pin the clock to an ISO 8601 instant (defaults to the current UTC time)
        #[arg(long)]
        now: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Snapshot document
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct Snapshot {
    #[serde(default)]
    schedule: Vec<WindowEntry>,
    #[serde(default)]
    lessons: Vec<LessonEntry>,
}

#[derive(Deserialize)]
struct WindowEntry {
    teacher_id: u64,
    weekday: String,
    start_time: NaiveTime,
    end_time: NaiveTime,
}

#[derive(Deserialize)]
struct LessonEntry {
    teacher_id: u64,
    start_time: String,
    #[serde(default)]
    end_time: Option<String>,
    status: String,
}

#[derive(Serialize)]
struct ApprovedOutput {
    teacher_id: u64,
    start_time: String,
    end_time: String,
}

#[derive(Serialize)]
struct SlotOutput {
    start_time: String,
    can_book_2_hours: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Availability {
            input,
            teacher,
            from,
            to,
            now,
        } => {
            let (windows, lessons) = load_snapshot(input.as_deref())?;
            let now = resolve_now(now.as_deref())?;

            let date_from = match from {
                Some(raw) => parse_date(&raw)?,
                None => now.date_naive(),
            };
            let date_to = match to {
                Some(raw) => parse_date(&raw)?,
                None => now.date_naive() + Duration::days(30),
            };

            let availability = compute_availability(
                TeacherId(teacher),
                date_from,
                date_to,
                &windows,
                &lessons,
                now,
            );

            let mut map = serde_json::Map::new();
            for (date, slots) in availability {
                let slots: Vec<SlotOutput> = slots
                    .into_iter()
                    .map(|s| SlotOutput {
                        start_time: s.start.to_rfc3339(),
                        can_book_2_hours: s.can_book_2_hours,
                    })
                    .collect();
                map.insert(date.to_string(), serde_json::to_value(slots)?);
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::Value::Object(map))?
            );
        }
        Commands::Check {
            input,
            teacher,
            start,
            hours,
            now,
        } => {
            let (windows, lessons) = load_snapshot(input.as_deref())?;
            let now = resolve_now(now.as_deref())?;

            let request = BookingRequest {
                teacher_id: TeacherId(teacher),
                start: parse_datetime(&start)
                    .with_context(|| format!("Invalid start timestamp: {}", start))?,
                duration: LessonDuration::try_from(hours).map_err(anyhow::Error::new)?,
            };

            let approved = validate(&request, &windows, &lessons, now)
                .map_err(anyhow::Error::new)
                .context("booking rejected")?;

            let output = ApprovedOutput {
                teacher_id: approved.teacher_id.0,
                start_time: approved.start.to_rfc3339(),
                end_time: approved.end.to_rfc3339(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Input handling
// ---------------------------------------------------------------------------

/// Read and convert a snapshot document into engine windows and lessons.
fn load_snapshot(path: Option<&str>) -> Result<(Vec<RecurringWindow>, Vec<BookedInterval>)> {
    let raw = read_input(path)?;
    let snapshot: Snapshot =
        serde_json::from_str(&raw).context("Failed to parse snapshot JSON")?;

    let windows = snapshot
        .schedule
        .into_iter()
        .map(|w| {
            let weekday: Weekday = w
                .weekday
                .parse()
                .ok()
                .with_context(|| format!("Invalid weekday: {:?}", w.weekday))?;
            RecurringWindow::new(TeacherId(w.teacher_id), weekday, w.start_time, w.end_time)
                .map_err(anyhow::Error::new)
        })
        .collect::<Result<Vec<_>>>()?;

    let lessons = snapshot
        .lessons
        .into_iter()
        .map(|l| {
            let status: LessonStatus = l.status.parse().map_err(anyhow::Error::new)?;
            let start = parse_datetime(&l.start_time)
                .with_context(|| format!("Invalid lesson start: {}", l.start_time))?;
            let end = l
                .end_time
                .as_deref()
                .map(|raw| {
                    parse_datetime(raw).with_context(|| format!("Invalid lesson end: {}", raw))
                })
                .transpose()?;
            Ok(BookedInterval {
                teacher_id: TeacherId(l.teacher_id),
                start,
                end,
                status,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((windows, lessons))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

// ---------------------------------------------------------------------------
// Time parsing
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime, accepting RFC 3339 or a naive
/// `YYYY-MM-DDTHH:MM:SS` interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .with_context(|| format!("Invalid datetime: {}", s))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    s.parse()
        .ok()
        .with_context(|| format!("Invalid date format: {:?}. Use YYYY-MM-DD.", s))
}

fn resolve_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(s) => parse_datetime(s).with_context(|| format!("Invalid --now timestamp: {}", s)),
        None => Ok(Utc::now()),
    }
}
