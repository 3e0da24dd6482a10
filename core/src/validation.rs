//! Due date/time checks applied before a task is written.
//!
//! The current instant is always passed in; nothing here reads the clock.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::model::task::Status;

static DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").unwrap());

// Colon between hours and minutes is optional.
static TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):?([0-5]\d)$").unwrap());

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid date format. Use YYYY-MM-DD.")]
    InvalidDateFormat,
    #[error("Invalid time format. Use HH:MM.")]
    InvalidTimeFormat,
    #[error("Invalid date or time value.")]
    InvalidDateTime,
    #[error("Please try to forget the Past! The date and time must be in the future.")]
    PastDateTime,
}

/// Checks that a task's due point is well formed and not in the past.
///
/// Tasks whose status is terminal (`Completed`, `Canceled`) skip every check,
/// so closing a task with a stale date is allowed. A composed instant equal
/// to `now` passes.
pub fn validate_due(
    due_date: &str,
    time: Option<&str>,
    status: &str,
    now: NaiveDateTime,
) -> Result<(), ValidationError> {
    if status.parse::<Status>().map(|s| s.is_terminal()).unwrap_or(false) {
        return Ok(());
    }

    let (year, month, day) = parse_date_parts(due_date).ok_or(ValidationError::InvalidDateFormat)?;

    let (hour, minute) = match time.filter(|t| !t.is_empty()) {
        Some(t) => parse_time_parts(t).ok_or(ValidationError::InvalidTimeFormat)?,
        None => (0, 0),
    };

    let due = compose(year, month, day, hour, minute).ok_or(ValidationError::InvalidDateTime)?;

    if due < now {
        return Err(ValidationError::PastDateTime);
    }

    Ok(())
}

/// Combines a due date and optional time into one instant.
///
/// Missing or empty time means midnight. Returns `None` for text that fails
/// the date/time patterns or names a day the calendar does not have
/// (`2024-02-30`).
pub fn compose_due(due_date: &str, time: Option<&str>) -> Option<NaiveDateTime> {
    let (year, month, day) = parse_date_parts(due_date)?;
    let (hour, minute) = match time.filter(|t| !t.is_empty()) {
        Some(t) => parse_time_parts(t)?,
        None => (0, 0),
    };
    compose(year, month, day, hour, minute)
}

fn parse_date_parts(input: &str) -> Option<(i32, u32, u32)> {
    let caps = DATE_REGEX.captures(input)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    Some((year, month, day))
}

fn parse_time_parts(input: &str) -> Option<(u32, u32)> {
    let caps = TIME_REGEX.captures(input)?;
    let hour = caps[1].parse().ok()?;
    let minute = caps[2].parse().ok()?;
    Some((hour, minute))
}

fn compose(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(date.and_time(time))
}
