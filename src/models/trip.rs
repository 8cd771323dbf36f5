//! Trip model.
//!
//! A trip is one directional run of one train between the two termini.
//! Trips are emitted by the induction scheduler in outbound/return pairs.

use serde::{Deserialize, Serialize};

use super::ClockTime;

/// One directional run of one train.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Assigned train ID.
    pub train_id: String,
    /// Unique trip identifier.
    pub trip_id: String,
    /// Direction of travel.
    pub direction: Direction,
    /// Route label shown to operators.
    pub route: String,
    /// Departure from the origin terminus.
    pub start_time: ClockTime,
    /// Arrival at the destination terminus.
    pub end_time: ClockTime,
    /// Lifecycle status.
    pub status: TripStatus,
    /// Whether the slot was chosen by the induction planner.
    pub ai_optimized: bool,
    /// Why this slot (or headway) was chosen.
    pub optimization_reason: String,
}

/// Direction of travel on the two-terminus line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Aluva → Thrippunithura.
    Outbound,
    /// Thrippunithura → Aluva.
    Return,
}

/// Trip lifecycle status.
///
/// The scheduler only emits `Scheduled`; later transitions are applied
/// through [`Schedule::update_trip_status`](super::Schedule::update_trip_status).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripStatus {
    #[default]
    Scheduled,
    Active,
    Completed,
    Delayed,
    Cancelled,
}

impl Direction {
    /// Route label for this direction.
    pub fn route_label(self) -> &'static str {
        match self {
            Direction::Outbound => "Aluva → Thrippunithura",
            Direction::Return => "Thrippunithura → Aluva",
        }
    }
}

impl Trip {
    /// Creates a scheduled trip departing at `start_time` and running for
    /// `run_minutes`.
    pub fn new(
        train_id: impl Into<String>,
        trip_id: impl Into<String>,
        direction: Direction,
        start_time: ClockTime,
        run_minutes: i32,
    ) -> Self {
        Self {
            train_id: train_id.into(),
            trip_id: trip_id.into(),
            direction,
            route: direction.route_label().to_string(),
            start_time,
            end_time: start_time.add_minutes(run_minutes),
            status: TripStatus::Scheduled,
            ai_optimized: false,
            optimization_reason: "Standard Schedule".to_string(),
        }
    }

    /// Marks the trip as planner-chosen with the given reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.ai_optimized = true;
        self.optimization_reason = reason.into();
        self
    }

    /// Run time in minutes, measured forward from departure.
    ///
    /// A trip arriving after midnight still reports its full run time.
    #[inline]
    pub fn run_minutes(&self) -> i32 {
        self.start_time.forward_minutes_until(self.end_time)
    }

    /// Departure as minutes on the service-day axis that starts at `anchor`.
    ///
    /// Departures at or after `anchor` keep their clock minutes; earlier
    /// clock times belong to the next calendar day and gain 1440.
    #[inline]
    pub fn service_start(&self, anchor: ClockTime) -> i32 {
        anchor.minutes() + anchor.forward_minutes_until(self.start_time)
    }

    /// Arrival on the same axis as [`Trip::service_start`], so that
    /// `service_end(a) >= service_start(a)`.
    #[inline]
    pub fn service_end(&self, anchor: ClockTime) -> i32 {
        self.service_start(anchor) + self.run_minutes()
    }
}

/// Start of the service day for a trip list: the departure of the first
/// trip in emission order, or midnight when empty.
pub fn service_anchor(trips: &[Trip]) -> ClockTime {
    trips
        .first()
        .map(|t| t.start_time)
        .unwrap_or(ClockTime::MIDNIGHT)
}
