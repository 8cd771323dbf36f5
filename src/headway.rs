//! Headway and overlap engine.
//!
//! Stateless time-interval arithmetic on [`ClockTime`] values: parse and
//! format `"HH:MM"`, add minutes, measure durations, test interval overlap,
//! and classify the gap between one train's arrival and the next train's
//! departure against a safety threshold.
//!
//! # Same-day restriction
//!
//! [`duration`] is a raw subtraction with no rollover correction, so
//! [`headway`] and [`overlaps`] are only meaningful for intervals that do
//! not cross midnight. For trips that depart or arrive after midnight, use
//! [`Trip::service_start`](crate::models::Trip::service_start) and
//! [`Trip::service_end`](crate::models::Trip::service_end) with the
//! service-day anchor.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::ClockTime;

/// Default minimum safe gap between consecutive trains (minutes).
pub const DEFAULT_SAFETY_THRESHOLD: i32 = 5;

/// Gap between an arrival and the next departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadwayResult {
    /// `next_departure - prev_arrival` in minutes (may be negative).
    pub gap_minutes: i32,
    /// Whether `gap_minutes >= threshold`.
    pub is_safe: bool,
}

/// Parses `"HH:MM"` into a clock time.
///
/// Fails with [`Error::InvalidFormat`](crate::Error::InvalidFormat) unless
/// the text is two colon-separated integers with hours in `0..=23` and
/// minutes in `0..=59`.
pub fn parse_time(text: &str) -> Result<ClockTime> {
    text.parse()
}

/// Parses `"HH:MM"`, treating empty or blank text as midnight.
///
/// Dashboard forms submit empty strings for unset times; this keeps that
/// input working. Non-empty malformed text still fails.
pub fn parse_time_lenient(text: &str) -> Result<ClockTime> {
    if text.trim().is_empty() {
        return Ok(ClockTime::MIDNIGHT);
    }
    parse_time(text)
}

/// Formats minutes since midnight as zero-padded `"HH:MM"`, folding day
/// rollover first.
pub fn format_time(minutes: i32) -> String {
    ClockTime::from_minutes(minutes).to_string()
}

/// Adds `minutes` to `start`, wrapping at midnight.
pub fn add_minutes(start: ClockTime, minutes: i32) -> ClockTime {
    start.add_minutes(minutes)
}

/// `end - start` in minutes. Negative when `end` precedes `start`.
pub fn duration(start: ClockTime, end: ClockTime) -> i32 {
    start.minutes_until(end)
}

/// Whether `[start_a, end_a)` and `[start_b, end_b)` overlap.
///
/// Touching endpoints do not count.
pub fn overlaps(start_a: ClockTime, end_a: ClockTime, start_b: ClockTime, end_b: ClockTime) -> bool {
    overlaps_minutes(
        start_a.minutes(),
        end_a.minutes(),
        start_b.minutes(),
        end_b.minutes(),
    )
}

/// Half-open overlap on raw minute offsets.
///
/// Accepts offsets past 1440 for intervals unwrapped across midnight.
#[inline]
pub fn overlaps_minutes(start_a: i32, end_a: i32, start_b: i32, end_b: i32) -> bool {
    start_a.max(start_b) < end_a.min(end_b)
}

/// Classifies the gap between `prev_arrival` and `next_departure`.
pub fn headway(prev_arrival: ClockTime, next_departure: ClockTime, threshold: i32) -> HeadwayResult {
    headway_minutes(prev_arrival.minutes(), next_departure.minutes(), threshold)
}

/// [`headway`] on raw minute offsets.
#[inline]
pub fn headway_minutes(prev_arrival: i32, next_departure: i32, threshold: i32) -> HeadwayResult {
    let gap_minutes = next_departure - prev_arrival;
    HeadwayResult {
        gap_minutes,
        is_safe: gap_minutes >= threshold,
    }
}

/// [`headway`] with the default 5-minute threshold.
pub fn headway_default(prev_arrival: ClockTime, next_departure: ClockTime) -> HeadwayResult {
    headway(prev_arrival, next_departure, DEFAULT_SAFETY_THRESHOLD)
}

/// [`overlaps`] on `"HH:MM"` strings.
pub fn overlaps_str(start_a: &str, end_a: &str, start_b: &str, end_b: &str) -> Result<bool> {
    Ok(overlaps(
        parse_time(start_a)?,
        parse_time(end_a)?,
        parse_time(start_b)?,
        parse_time(end_b)?,
    ))
}

/// [`headway`] on `"HH:MM"` strings.
pub fn headway_str(prev_arrival: &str, next_departure: &str, threshold: i32) -> Result<HeadwayResult> {
    Ok(headway(
        parse_time(prev_arrival)?,
        parse_time(next_departure)?,
        threshold,
    ))
}
