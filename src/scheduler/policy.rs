//! Induction policy: the fixed operating constants of the line.
//!
//! The default policy is the published one (06:00–22:00 service, peak
//! hours 08–10 and 17–19, 5/12 minute headways, 75 minute run, 10 minute
//! turnaround). A policy can be loaded from TOML, with missing keys taking
//! their default values:
//!
//! ```
//! use metro_induction::scheduler::InductionPolicy;
//!
//! let policy = InductionPolicy::from_toml_str(r#"
//!     service_end = "20:00"
//!     off_peak_headway = 15
//! "#).unwrap();
//! assert_eq!(policy.off_peak_headway, 15);
//! assert_eq!(policy.trip_minutes, 75);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::ClockTime;

/// Operating constants for timetable generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InductionPolicy {
    /// First outbound departure of the day.
    pub service_start: ClockTime,
    /// No outbound departure at or after this time.
    pub service_end: ClockTime,
    /// Clock hours (0..=23) treated as peak, each covering the full hour.
    pub peak_hours: Vec<u32>,
    /// Headway during peak hours (minutes).
    pub peak_headway: i32,
    /// Headway outside peak hours (minutes).
    pub off_peak_headway: i32,
    /// Terminus-to-terminus run time (minutes).
    pub trip_minutes: i32,
    /// Dwell at the far terminus before the return run (minutes).
    pub turnaround_minutes: i32,
    /// Floor for a demand-compressed headway (minutes).
    pub min_headway: i32,
    /// Load factor above which peak headways are compressed.
    pub compression_load_factor: f64,
    /// Minutes removed from the peak headway under compression.
    pub compression_minutes: i32,
}

/// Headway chosen for one induction round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadwaySlot {
    /// Minutes until the next round.
    pub headway: i32,
    /// Whether the round starts in a peak hour.
    pub is_peak: bool,
    /// Whether high demand shortened the headway.
    pub compressed: bool,
}

impl Default for InductionPolicy {
    fn default() -> Self {
        Self {
            service_start: ClockTime::from_minutes(6 * 60),
            service_end: ClockTime::from_minutes(22 * 60),
            peak_hours: vec![8, 9, 10, 17, 18, 19],
            peak_headway: 5,
            off_peak_headway: 12,
            trip_minutes: 75,
            turnaround_minutes: 10,
            min_headway: 3,
            compression_load_factor: 1.2,
            compression_minutes: 2,
        }
    }
}

impl InductionPolicy {
    /// Parses a policy from TOML and validates it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let policy: Self = toml::from_str(text)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Serializes the policy as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Sets the service window.
    pub fn with_service_window(mut self, start: ClockTime, end: ClockTime) -> Self {
        self.service_start = start;
        self.service_end = end;
        self
    }

    /// Sets the peak hours.
    pub fn with_peak_hours(mut self, hours: Vec<u32>) -> Self {
        self.peak_hours = hours;
        self
    }

    /// Sets the peak and off-peak headways.
    pub fn with_headways(mut self, peak: i32, off_peak: i32) -> Self {
        self.peak_headway = peak;
        self.off_peak_headway = off_peak;
        self
    }

    /// Sets run time and turnaround.
    pub fn with_trip_times(mut self, trip_minutes: i32, turnaround_minutes: i32) -> Self {
        self.trip_minutes = trip_minutes;
        self.turnaround_minutes = turnaround_minutes;
        self
    }

    /// Checks that every headway is positive so generation always advances.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::InvalidPolicy(msg));

        if self.peak_headway <= 0 || self.off_peak_headway <= 0 {
            return invalid(format!(
                "headways must be positive (peak {}, off-peak {})",
                self.peak_headway, self.off_peak_headway
            ));
        }
        if self.min_headway <= 0 || self.min_headway > self.peak_headway {
            return invalid(format!(
                "min_headway {} must be in 1..={}",
                self.min_headway, self.peak_headway
            ));
        }
        if self.compression_minutes < 0 {
            return invalid(format!(
                "compression_minutes {} must not be negative",
                self.compression_minutes
            ));
        }
        if self.trip_minutes <= 0 || self.turnaround_minutes < 0 {
            return invalid(format!(
                "trip_minutes {} must be positive and turnaround_minutes {} non-negative",
                self.trip_minutes, self.turnaround_minutes
            ));
        }
        if self.service_end <= self.service_start {
            return invalid(format!(
                "service window {}-{} is empty",
                self.service_start, self.service_end
            ));
        }
        if let Some(hour) = self.peak_hours.iter().find(|&&h| h > 23) {
            return invalid(format!("peak hour {hour} is not a clock hour"));
        }
        Ok(())
    }

    /// Whether `time` falls in a peak hour.
    pub fn is_peak(&self, time: ClockTime) -> bool {
        self.peak_hours.contains(&time.hour())
    }

    /// Chooses the headway for a round starting at `time`.
    ///
    /// Peak rounds are compressed by `compression_minutes` (down to
    /// `min_headway`) when `load_factor` exceeds `compression_load_factor`.
    /// Off-peak headways never change with load.
    pub fn headway_at(&self, time: ClockTime, load_factor: f64) -> HeadwaySlot {
        let is_peak = self.is_peak(time);
        if !is_peak {
            return HeadwaySlot {
                headway: self.off_peak_headway,
                is_peak,
                compressed: false,
            };
        }

        let compressed = load_factor > self.compression_load_factor;
        let headway = if compressed {
            self.min_headway
                .max(self.peak_headway - self.compression_minutes)
        } else {
            self.peak_headway
        };
        HeadwaySlot {
            headway,
            is_peak,
            compressed,
        }
    }

    /// Minutes from an outbound departure to its return departure.
    #[inline]
    pub fn return_offset(&self) -> i32 {
        self.trip_minutes + self.turnaround_minutes
    }
}

impl HeadwaySlot {
    /// Operator-facing reason for an outbound trip in this slot.
    pub fn reason(&self) -> String {
        if self.is_peak {
            format!("Peak Hour Demand (Gap: {}m)", self.headway)
        } else {
            "Energy Conservation Mode".to_string()
        }
    }
}
