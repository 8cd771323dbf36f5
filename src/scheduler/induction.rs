//! Train-induction timetable generator.
//!
//! # Algorithm
//!
//! 1. Reject an empty roster.
//! 2. Start the clock at the service start, round index at 0.
//! 3. While the clock is before the service end:
//!    - pick the round's headway from the hour (peak/off-peak) and the load
//!      factor (compressed peak headway under high demand);
//!    - assign the next train in round-robin order;
//!    - emit the outbound trip at the clock and the return trip after run
//!      time plus turnaround;
//!    - advance the clock by the headway.
//!
//! Assignment does not track where a train is. With headways shorter than
//! a round trip, one train can receive overlapping windows; run
//! [`validation::audit`](crate::validation::audit) over the result to find
//! them.
//!
//! # Complexity
//! O(r) where r = rounds in the service window.

use std::sync::Arc;

use log::{debug, info};

use super::ids::{RandomTripIds, TripIdSource};
use super::policy::InductionPolicy;
use crate::error::{Error, Result};
use crate::models::{ClockTime, Direction, Schedule, Train, Trip};

/// Load factor used when the caller has no demand estimate.
pub const DEFAULT_LOAD_FACTOR: f64 = 1.0;

/// Input container for one generation run.
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    /// Eligible trains, in rotation order.
    pub trains: Vec<Train>,
    /// Relative passenger demand (1.0 = normal).
    pub load_factor: f64,
    /// Operating date stamped on the schedule.
    pub date: Option<String>,
    /// Service window override (start, end).
    pub window: Option<(ClockTime, ClockTime)>,
}

impl ScheduleRequest {
    /// Creates a request at the default load factor.
    pub fn new(trains: Vec<Train>) -> Self {
        Self {
            trains,
            load_factor: DEFAULT_LOAD_FACTOR,
            date: None,
            window: None,
        }
    }

    /// Sets the load factor.
    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Sets the operating date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Overrides the service window.
    pub fn with_window(mut self, start: ClockTime, end: ClockTime) -> Self {
        self.window = Some((start, end));
        self
    }
}

/// Round-robin induction scheduler.
///
/// # Example
///
/// ```
/// use metro_induction::models::Train;
/// use metro_induction::scheduler::{InductionScheduler, SequentialTripIds};
///
/// let scheduler = InductionScheduler::new().with_id_source(SequentialTripIds::default());
/// let trips = scheduler
///     .generate(&[Train::new("T-101"), Train::new("T-102")], 1.3)
///     .unwrap();
///
/// assert_eq!(trips[0].start_time.to_string(), "06:00");
/// assert_eq!(trips[0].trip_id, "TRIP-0001");
/// assert_eq!(trips[1].train_id, "T-101");
/// assert_eq!(trips[2].train_id, "T-102");
/// ```
#[derive(Debug, Clone)]
pub struct InductionScheduler {
    policy: InductionPolicy,
    ids: Arc<dyn TripIdSource>,
}

impl InductionScheduler {
    /// Creates a scheduler with the default policy and random trip ids.
    pub fn new() -> Self {
        Self {
            policy: InductionPolicy::default(),
            ids: Arc::new(RandomTripIds::new()),
        }
    }

    /// Sets the induction policy.
    pub fn with_policy(mut self, policy: InductionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the trip identifier source.
    pub fn with_id_source(mut self, ids: impl TripIdSource + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    /// The active policy.
    pub fn policy(&self) -> &InductionPolicy {
        &self.policy
    }

    /// Generates the day's trips over the policy's service window.
    ///
    /// `trains` must already exclude trains in maintenance; status is not
    /// re-checked. Fails with [`Error::NoEligibleTrains`] if it is empty,
    /// or [`Error::InvalidPolicy`] if the policy cannot make progress.
    pub fn generate(&self, trains: &[Train], load_factor: f64) -> Result<Vec<Trip>> {
        self.generate_in_window(
            trains,
            load_factor,
            self.policy.service_start,
            self.policy.service_end,
        )
    }

    /// Generates trips between `start` (inclusive) and `end` (exclusive).
    pub fn generate_in_window(
        &self,
        trains: &[Train],
        load_factor: f64,
        start: ClockTime,
        end: ClockTime,
    ) -> Result<Vec<Trip>> {
        if trains.is_empty() {
            return Err(Error::NoEligibleTrains);
        }
        let policy = InductionPolicy {
            service_start: start,
            service_end: end,
            ..self.policy.clone()
        };
        policy.validate()?;

        info!(
            "induction: optimizing for {} trains with load factor {load_factor}",
            trains.len()
        );

        let mut trips = Vec::new();
        let mut current = start.minutes();
        let mut round = 0usize;

        while current < end.minutes() {
            let departure = ClockTime::from_minutes(current);
            let slot = policy.headway_at(departure, load_factor);
            if slot.compressed {
                debug!(
                    "induction: {departure} peak headway compressed to {}m",
                    slot.headway
                );
            }

            let train = &trains[round % trains.len()];

            trips.push(
                Trip::new(
                    &train.id,
                    self.ids.next_id(),
                    Direction::Outbound,
                    departure,
                    policy.trip_minutes,
                )
                .with_reason(slot.reason()),
            );
            trips.push(
                Trip::new(
                    &train.id,
                    self.ids.next_id(),
                    Direction::Return,
                    departure.add_minutes(policy.return_offset()),
                    policy.trip_minutes,
                )
                .with_reason("Turnaround Optimization"),
            );

            current += slot.headway;
            round += 1;
        }

        info!(
            "induction: generation complete, {} trips over {round} rounds",
            trips.len()
        );
        Ok(trips)
    }

    /// Generates a [`Schedule`] from a request.
    pub fn schedule_request(&self, request: &ScheduleRequest) -> Result<Schedule> {
        let (start, end) = request
            .window
            .unwrap_or((self.policy.service_start, self.policy.service_end));
        let trips = self.generate_in_window(&request.trains, request.load_factor, start, end)?;

        let mut schedule = Schedule::from_trips(trips);
        schedule.date = request.date.clone();
        Ok(schedule)
    }
}

impl Default for InductionScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TripStatus;
    use crate::scheduler::SequentialTripIds;
    use std::collections::{HashMap, HashSet};

    fn make_trains(n: usize) -> Vec<Train> {
        (1..=n).map(|i| Train::new(format!("T-{:03}", 100 + i))).collect()
    }

    fn scheduler() -> InductionScheduler {
        InductionScheduler::new().with_id_source(SequentialTripIds::default())
    }

    fn at(h: u32, m: u32) -> ClockTime {
        ClockTime::from_hm(h, m).unwrap()
    }

    fn outbound(trips: &[Trip]) -> Vec<&Trip> {
        trips
            .iter()
            .filter(|t| t.direction == Direction::Outbound)
            .collect()
    }

    #[test]
    fn test_empty_roster() {
        let err = scheduler().generate(&[], 1.0).unwrap_err();
        assert_eq!(err, Error::NoEligibleTrains);
    }

    #[test]
    fn test_first_and_last_departure() {
        let trips = scheduler().generate(&make_trains(2), 1.3).unwrap();
        assert!(!trips.is_empty());
        assert_eq!(trips[0].start_time.to_string(), "06:00");
        assert_eq!(trips[0].direction, Direction::Outbound);

        let last_outbound = outbound(&trips).last().unwrap().start_time;
        assert!(last_outbound < at(22, 0));
        // The final trip is the return of the final round.
        let last = trips.last().unwrap();
        assert_eq!(last.direction, Direction::Return);
        assert_eq!(last.start_time, last_outbound.add_minutes(85));
    }

    #[test]
    fn test_every_trip_runs_75_minutes() {
        let trips = scheduler().generate(&make_trains(3), 1.0).unwrap();
        assert!(trips.iter().all(|t| t.run_minutes() == 75));
    }

    #[test]
    fn test_pairs_separated_by_turnaround() {
        let trips = scheduler().generate(&make_trains(3), 1.0).unwrap();
        assert_eq!(trips.len() % 2, 0);
        let anchor = trips[0].start_time;
        for pair in trips.chunks(2) {
            let (down, up) = (&pair[0], &pair[1]);
            assert_eq!(down.direction, Direction::Outbound);
            assert_eq!(up.direction, Direction::Return);
            assert_eq!(down.train_id, up.train_id);
            assert_eq!(up.service_start(anchor) - down.service_end(anchor), 10);
        }
    }

    #[test]
    fn test_headway_advance_by_hour() {
        let policy = InductionPolicy::default();
        for load in [1.0, 1.2, 1.3] {
            let trips = scheduler().generate(&make_trains(2), load).unwrap();
            let anchor = trips[0].start_time;
            let departures = outbound(&trips);
            for w in departures.windows(2) {
                let gap = w[1].service_start(anchor) - w[0].service_start(anchor);
                let expected = if !policy.is_peak(w[0].start_time) {
                    12
                } else if load > 1.2 {
                    3
                } else {
                    5
                };
                assert_eq!(gap, expected, "round at {} load {load}", w[0].start_time);
            }
        }
    }

    #[test]
    fn test_round_count_default_day() {
        // 06:00-08:00 off-peak: 10 rounds (06:00..07:48), 08:00-11:00 peak at 5m: 36,
        // 11:00-17:00 off-peak: 30, 17:00-20:00 peak: 36, 20:00-22:00: 10.
        let trips = scheduler().generate(&make_trains(1), 1.0).unwrap();
        assert_eq!(outbound(&trips).len(), 122);
        assert_eq!(trips.len(), 244);
    }

    #[test]
    fn test_round_robin_fairness() {
        for n in 1..=5 {
            let trips = scheduler().generate(&make_trains(n), 1.3).unwrap();
            let rounds = outbound(&trips);
            let mut per_train: HashMap<&str, usize> = HashMap::new();
            for t in &rounds {
                *per_train.entry(t.train_id.as_str()).or_default() += 1;
            }
            let r = rounds.len();
            assert_eq!(per_train.len(), n.min(r));
            for &count in per_train.values() {
                assert!(count == r / n || count == r.div_ceil(n));
            }
            // Strict rotation order.
            for (i, t) in rounds.iter().enumerate() {
                assert_eq!(t.train_id, format!("T-{:03}", 100 + (i % n) + 1));
            }
        }
    }

    #[test]
    fn test_trip_fields() {
        let trips = scheduler().generate(&make_trains(1), 1.0).unwrap();
        let down = &trips[0];
        let up = &trips[1];
        assert_eq!(down.route, "Aluva → Thrippunithura");
        assert_eq!(up.route, "Thrippunithura → Aluva");
        assert_eq!(down.optimization_reason, "Energy Conservation Mode");
        assert_eq!(up.optimization_reason, "Turnaround Optimization");
        assert!(trips.iter().all(|t| t.ai_optimized));
        assert!(trips.iter().all(|t| t.status == TripStatus::Scheduled));

        let peak = trips
            .iter()
            .find(|t| t.direction == Direction::Outbound && t.start_time == at(8, 0))
            .unwrap();
        assert_eq!(peak.optimization_reason, "Peak Hour Demand (Gap: 5m)");
    }

    #[test]
    fn test_trip_ids_unique() {
        let trips = InductionScheduler::new().generate(&make_trains(4), 1.3).unwrap();
        let ids: HashSet<_> = trips.iter().map(|t| t.trip_id.as_str()).collect();
        assert_eq!(ids.len(), trips.len());
    }

    #[test]
    fn test_deterministic_with_sequential_ids() {
        let a = scheduler().generate(&make_trains(3), 1.3).unwrap();
        let b = scheduler().generate(&make_trains(3), 1.3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_short_window() {
        let trips = scheduler()
            .generate_in_window(&make_trains(2), 1.0, at(21, 55), at(22, 0))
            .unwrap();
        assert_eq!(trips.len(), 2);
        assert_eq!(trips[1].start_time.to_string(), "23:20");
        assert_eq!(trips[1].end_time.to_string(), "00:35");
    }

    #[test]
    fn test_invalid_window() {
        let err = scheduler()
            .generate_in_window(&make_trains(1), 1.0, at(22, 0), at(6, 0))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPolicy(_)));
    }

    #[test]
    fn test_extreme_load_factors() {
        for load in [-1.0, 0.0, f64::NAN, 100.0] {
            let trips = scheduler().generate(&make_trains(2), load).unwrap();
            assert!(!trips.is_empty());
        }
    }

    #[test]
    fn test_custom_policy() {
        let policy = InductionPolicy::default()
            .with_service_window(at(7, 0), at(8, 0))
            .with_headways(6, 20);
        let trips = scheduler()
            .with_policy(policy)
            .generate(&make_trains(2), 1.0)
            .unwrap();
        // 07:00, 07:20, 07:40
        assert_eq!(outbound(&trips).len(), 3);
    }

    #[test]
    fn test_schedule_request() {
        let request = ScheduleRequest::new(make_trains(2))
            .with_load_factor(1.5)
            .with_date("2026-10-16")
            .with_window(at(8, 0), at(9, 0));
        let schedule = scheduler().schedule_request(&request).unwrap();
        assert_eq!(schedule.date.as_deref(), Some("2026-10-16"));
        // 60 minutes of compressed 3m headway.
        assert_eq!(schedule.round_count(), 20);
        assert_eq!(schedule.efficiency_score, 0.0);
    }

    #[test]
    fn test_schedule_request_empty() {
        let request = ScheduleRequest::new(vec![]);
        assert_eq!(
            scheduler().schedule_request(&request).unwrap_err(),
            Error::NoEligibleTrains
        );
    }
}
