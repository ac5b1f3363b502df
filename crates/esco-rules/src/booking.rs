//! Booking windows and per-doctor overlap detection.
//!
//! Dates travel as `YYYY-MM-DD` strings and times as `HH:MM` strings; they are
//! parsed here with `chrono` so every zome compares them the same way. Input
//! is lenient (`2025-3-14`, `9:00`, surrounding spaces); what gets stored is
//! the canonical zero-padded form.

use chrono::{NaiveDate, NaiveTime, Timelike};
use std::fmt;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),
    #[error("appointment length must be positive")]
    ZeroLength,
}

const MINUTES_PER_DAY: u32 = 24 * 60;

pub fn parse_date(value: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| BookingError::InvalidDate(value.to_string()))
}

pub fn parse_time(value: &str) -> Result<NaiveTime, BookingError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|_| BookingError::InvalidTime(value.to_string()))
}

/// `YYYY-MM-DD`, zero-padded
pub fn canonical_date(value: &str) -> Result<String, BookingError> {
    Ok(parse_date(value)?.format(DATE_FORMAT).to_string())
}

/// `HH:MM`, zero-padded
pub fn canonical_time(value: &str) -> Result<String, BookingError> {
    Ok(parse_time(value)?.format(TIME_FORMAT).to_string())
}

/// Half-open window `[start, end)` in minutes since midnight
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookingWindow {
    pub start: u32,
    pub end: u32,
}

impl BookingWindow {
    /// Window of `minutes` from `time`, clipped at midnight
    pub fn starting_at(time: &str, minutes: u32) -> Result<Self, BookingError> {
        if minutes == 0 {
            return Err(BookingError::ZeroLength);
        }
        let parsed = parse_time(time)?;
        let start = parsed.hour() * 60 + parsed.minute();
        let end = start.saturating_add(minutes).min(MINUTES_PER_DAY);
        Ok(Self { start, end })
    }

    /// Window spanning two explicit times, used by schedule slots
    pub fn between(start: &str, end: &str) -> Result<Option<Self>, BookingError> {
        let start = parse_time(start)?;
        let end = parse_time(end)?;
        if start >= end {
            return Ok(None);
        }
        Ok(Some(Self {
            start: start.hour() * 60 + start.minute(),
            end: end.hour() * 60 + end.minute(),
        }))
    }

    pub fn overlaps(&self, other: &BookingWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for BookingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start / 60,
            self.start % 60,
            self.end / 60,
            self.end % 60
        )
    }
}

/// First existing booking whose window overlaps a booking at `time`.
///
/// `existing` holds `(key, time)` pairs for the same doctor on the same day,
/// already stripped of cancelled appointments and of the appointment being
/// rescheduled.
pub fn find_conflict<'a, K>(
    time: &str,
    minutes: u32,
    existing: &'a [(K, String)],
) -> Result<Option<&'a K>, BookingError> {
    let wanted = BookingWindow::starting_at(time, minutes)?;
    for (key, other_time) in existing {
        let other = BookingWindow::starting_at(other_time, minutes)?;
        if wanted.overlaps(&other) {
            return Ok(Some(key));
        }
    }
    Ok(None)
}

/// Anchor path segment for one doctor's day, e.g. `2025-03-14`
pub fn day_key(date: &str) -> Result<String, BookingError> {
    canonical_date(date)
}
