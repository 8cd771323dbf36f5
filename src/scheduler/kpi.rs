//! Timetable quality metrics (KPIs).
//!
//! Computes operating indicators from a generated schedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Rounds | Outbound departures |
//! | Peak share | Fraction of rounds departing in a peak hour |
//! | Avg headway | Mean gap between consecutive outbound departures |
//! | Train utilization | Running minutes / service span, per train |
//! | Efficiency score | 100 × (1 − conflicts / trips), floored at 0 |

use std::collections::HashMap;

use crate::models::{Direction, Schedule};
use crate::scheduler::InductionPolicy;

/// Timetable performance indicators.
///
/// All times are in minutes.
#[derive(Debug, Clone)]
pub struct ScheduleKpi {
    /// Total trips (both directions).
    pub trip_count: usize,
    /// Outbound departures.
    pub round_count: usize,
    /// Fraction of rounds starting in a peak hour (0.0..1.0).
    pub peak_share: f64,
    /// Rounds assigned to each train.
    pub rounds_by_train: HashMap<String, usize>,
    /// Mean gap between consecutive outbound departures.
    pub avg_headway_minutes: f64,
    /// Per-train running time over the service span (may exceed 1.0 when a
    /// train is double-booked).
    pub utilization_by_train: HashMap<String, f64>,
    /// Conflicts recorded on the schedule.
    pub conflict_count: usize,
    /// 0..=100, penalizing recorded conflicts.
    pub efficiency_score: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule and the policy that produced it.
    ///
    /// Conflicts are read from `schedule.violations`; run
    /// [`audit_schedule`](crate::validation::audit_schedule) first.
    pub fn calculate(schedule: &Schedule, policy: &InductionPolicy) -> Self {
        let trip_count = schedule.trip_count();

        let anchor = schedule.service_anchor();
        let mut departures: Vec<i32> = Vec::new();
        let mut peak_rounds = 0usize;
        let mut rounds_by_train: HashMap<String, usize> = HashMap::new();
        for trip in schedule.trips_in_direction(Direction::Outbound) {
            departures.push(trip.service_start(anchor));
            if policy.is_peak(trip.start_time) {
                peak_rounds += 1;
            }
            *rounds_by_train.entry(trip.train_id.clone()).or_insert(0) += 1;
        }
        departures.sort_unstable();
        let round_count = departures.len();

        let peak_share = if round_count == 0 {
            0.0
        } else {
            peak_rounds as f64 / round_count as f64
        };

        let avg_headway_minutes = if round_count < 2 {
            0.0
        } else {
            let total: i32 = departures.windows(2).map(|w| w[1] - w[0]).sum();
            total as f64 / (round_count - 1) as f64
        };

        // Service span: first departure to last arrival.
        let span_start = schedule.trips.iter().map(|t| t.service_start(anchor)).min();
        let span_end = schedule.trips.iter().map(|t| t.service_end(anchor)).max();
        let span = match (span_start, span_end) {
            (Some(s), Some(e)) => e - s,
            _ => 0,
        };

        let mut busy: HashMap<String, i32> = HashMap::new();
        for trip in &schedule.trips {
            *busy.entry(trip.train_id.clone()).or_insert(0) += trip.run_minutes();
        }
        let utilization_by_train = if span <= 0 {
            HashMap::new()
        } else {
            busy.into_iter()
                .map(|(id, minutes)| (id, minutes as f64 / span as f64))
                .collect()
        };

        let conflict_count = schedule.violations.len();
        let efficiency_score = if trip_count == 0 {
            0.0
        } else {
            (100.0 * (1.0 - conflict_count as f64 / trip_count as f64)).max(0.0)
        };

        Self {
            trip_count,
            round_count,
            peak_share,
            rounds_by_train,
            avg_headway_minutes,
            utilization_by_train,
            conflict_count,
            efficiency_score,
        }
    }

    /// Mean utilization across trains (0.0 if none).
    pub fn avg_utilization(&self) -> f64 {
        if self.utilization_by_train.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.utilization_by_train.values().sum();
        sum / self.utilization_by_train.len() as f64
    }

    /// Copies the efficiency score onto the schedule record.
    pub fn apply_to(&self, schedule: &mut Schedule) {
        schedule.efficiency_score = self.efficiency_score;
    }

    /// Whether the timetable meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_efficiency: f64, max_conflicts: usize) -> bool {
        self.efficiency_score >= min_efficiency && self.conflict_count <= max_conflicts
    }
}
