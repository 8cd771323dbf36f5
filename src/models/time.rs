//! Clock-time model.
//!
//! A [`ClockTime`] is a time of day stored as minutes since midnight in
//! `[0, 1440)`. It is always displayed and serialized as zero-padded
//! `"HH:MM"`, and arithmetic folds day rollover modulo 1440.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Minutes in one day.
pub const MINUTES_PER_DAY: i32 = 1440;

/// A time of day, minutes since midnight.
///
/// # Examples
///
/// ```
/// use metro_induction::models::ClockTime;
///
/// let t: ClockTime = "09:30".parse().unwrap();
/// assert_eq!(t.minutes(), 570);
/// assert_eq!(t.add_minutes(45).to_string(), "10:15");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Midnight.
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Creates a clock time from hour and minute components.
    ///
    /// Fails with [`Error::InvalidFormat`] if `hour > 23` or `minute > 59`.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(Error::InvalidFormat(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self((hour * 60 + minute) as u16))
    }

    /// Creates a clock time from a minute count, folding into one day.
    ///
    /// Negative counts fold backwards (`-10` → `23:50`).
    pub fn from_minutes(minutes: i32) -> Self {
        Self(minutes.rem_euclid(MINUTES_PER_DAY) as u16)
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(self) -> i32 {
        i32::from(self.0)
    }

    /// Hour component (0..=23).
    #[inline]
    pub fn hour(self) -> u32 {
        u32::from(self.0 / 60)
    }

    /// Minute component (0..=59).
    #[inline]
    pub fn minute(self) -> u32 {
        u32::from(self.0 % 60)
    }

    /// Adds a (possibly negative) number of minutes, wrapping at midnight.
    pub fn add_minutes(self, minutes: i32) -> Self {
        Self::from_minutes(self.minutes() + minutes)
    }

    /// Raw difference `end - self` in minutes. Negative if `end` is earlier.
    #[inline]
    pub fn minutes_until(self, end: ClockTime) -> i32 {
        end.minutes() - self.minutes()
    }

    /// Forward distance to `end`, wrapping across midnight (0..1440).
    #[inline]
    pub fn forward_minutes_until(self, end: ClockTime) -> i32 {
        self.minutes_until(end).rem_euclid(MINUTES_PER_DAY)
    }
}

impl FromStr for ClockTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidFormat(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        // A third component ("10:30:00") fails the minute parse.
        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).map_err(|_| invalid())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<String> for ClockTime {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}
