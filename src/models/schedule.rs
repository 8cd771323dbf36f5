//! Schedule (timetable) model.
//!
//! A schedule is the ordered list of trips for one operating date, plus
//! aggregate metrics filled in by the caller and any conflicts found by
//! [`validation::audit`](crate::validation::audit).
//!
//! Trip order is emission order; it is never re-sorted.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{service_anchor, ClockTime, Direction, Trip, TripStatus};
use crate::error::{Error, Result};

/// A day's induction timetable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Operating date (ISO `YYYY-MM-DD`), if known.
    pub date: Option<String>,
    /// Trips in emission order.
    pub trips: Vec<Trip>,
    /// Efficiency score (0-100), computed by the caller.
    pub efficiency_score: f64,
    /// Number of conflicts resolved before publishing.
    pub conflicts_resolved: u32,
    /// Conflicts detected in this schedule.
    pub violations: Vec<Violation>,
}

/// A scheduling conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity ID (train or trip).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
    /// Severity (0-100, higher = worse).
    pub severity: i32,
}

/// Classification of scheduling conflicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// One train holds two trips whose windows overlap.
    TrainDoubleBooked,
    /// Two consecutive departures in one direction are closer than the
    /// safety headway.
    HeadwayViolation,
}

impl Violation {
    /// Creates a double-booking violation for a train.
    pub fn double_booked(train_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::TrainDoubleBooked,
            entity_id: train_id.into(),
            message: message.into(),
            severity: 95,
        }
    }

    /// Creates a headway violation for the trailing trip.
    pub fn headway(trip_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::HeadwayViolation,
            entity_id: trip_id.into(),
            message: message.into(),
            severity: 80,
        }
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a schedule from generated trips.
    pub fn from_trips(trips: Vec<Trip>) -> Self {
        Self {
            trips,
            ..Self::default()
        }
    }

    /// Sets the operating date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Appends a trip.
    pub fn add_trip(&mut self, trip: Trip) {
        self.trips.push(trip);
    }

    /// Adds a violation.
    pub fn add_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Whether the schedule has no violations.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of trips.
    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    /// Number of induction rounds (outbound departures).
    pub fn round_count(&self) -> usize {
        self.trips_in_direction(Direction::Outbound).count()
    }

    /// Start of the service day: the first trip's departure.
    pub fn service_anchor(&self) -> ClockTime {
        service_anchor(&self.trips)
    }

    /// Finds a trip by id.
    pub fn trip(&self, trip_id: &str) -> Option<&Trip> {
        self.trips.iter().find(|t| t.trip_id == trip_id)
    }

    /// Returns all trips assigned to a train, in emission order.
    pub fn trips_for_train(&self, train_id: &str) -> Vec<&Trip> {
        self.trips.iter().filter(|t| t.train_id == train_id).collect()
    }

    /// Iterates over trips running in one direction.
    pub fn trips_in_direction(&self, direction: Direction) -> impl Iterator<Item = &Trip> {
        self.trips.iter().filter(move |t| t.direction == direction)
    }

    /// Trips grouped by train ID.
    pub fn trips_by_train(&self) -> HashMap<&str, Vec<&Trip>> {
        let mut by_train: HashMap<&str, Vec<&Trip>> = HashMap::new();
        for trip in &self.trips {
            by_train.entry(trip.train_id.as_str()).or_default().push(trip);
        }
        by_train
    }

    /// Applies a lifecycle transition to a trip.
    ///
    /// A non-zero `delay_minutes` rewrites the optimization reason to
    /// `"Manual Delay: {n}m"`. Fails with [`Error::TripNotFound`] for an
    /// unknown id.
    pub fn update_trip_status(
        &mut self,
        trip_id: &str,
        status: Option<TripStatus>,
        delay_minutes: Option<u32>,
    ) -> Result<&Trip> {
        let trip = self
            .trips
            .iter_mut()
            .find(|t| t.trip_id == trip_id)
            .ok_or_else(|| Error::TripNotFound(trip_id.to_string()))?;

        if let Some(status) = status {
            trip.status = status;
        }
        if let Some(delay) = delay_minutes.filter(|&d| d > 0) {
            trip.optimization_reason = format!("Manual Delay: {delay}m");
        }

        Ok(&*trip)
    }
}
