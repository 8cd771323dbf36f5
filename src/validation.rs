//! Conflict audit for generated timetables.
//!
//! The induction scheduler assigns trains without tracking their position,
//! so its output can contain conflicts. This module detects them without
//! repairing anything:
//! - **Double booking**: one train holds two trips whose windows overlap.
//! - **Headway violation**: two consecutive departures from the same
//!   terminus are closer than the safety threshold.
//!
//! Times are compared as service-day minutes measured from the first trip's
//! departure, so trips that depart or arrive after midnight sort after the
//! evening's trips.

use log::warn;
use std::collections::HashMap;

use crate::headway::{headway_minutes, overlaps_minutes};
use crate::models::{service_anchor, Direction, Schedule, Trip, Violation};

/// Audits a trip list and returns every conflict found.
///
/// Double bookings are reported per train in departure order, followed by
/// headway violations for outbound then return departures.
pub fn audit(trips: &[Trip], safety_threshold: i32) -> Vec<Violation> {
    let mut violations = detect_double_booking(trips);
    violations.extend(detect_headway_violations(trips, safety_threshold));

    if !violations.is_empty() {
        warn!(
            "audit: {} conflicts in {} trips (threshold {safety_threshold}m)",
            violations.len(),
            trips.len()
        );
    }
    violations
}

/// Audits a schedule, recording conflicts in `schedule.violations`.
///
/// Replaces any previous audit result. Returns the number of conflicts.
pub fn audit_schedule(schedule: &mut Schedule, safety_threshold: i32) -> usize {
    schedule.violations = audit(&schedule.trips, safety_threshold);
    schedule.violations.len()
}

/// Finds trains assigned to overlapping trips.
///
/// # Algorithm
/// Per train, sort trips by departure and sweep, keeping the trip with the
/// latest arrival seen so far. A departure before that arrival is a
/// double booking.
pub fn detect_double_booking(trips: &[Trip]) -> Vec<Violation> {
    let anchor = service_anchor(trips);
    let mut train_order: Vec<&str> = Vec::new();
    let mut by_train: HashMap<&str, Vec<&Trip>> = HashMap::new();
    for trip in trips {
        let entry = by_train.entry(trip.train_id.as_str()).or_default();
        if entry.is_empty() {
            train_order.push(trip.train_id.as_str());
        }
        entry.push(trip);
    }

    let mut violations = Vec::new();
    for train_id in train_order {
        let mut assigned = by_train.remove(train_id).unwrap_or_default();
        assigned.sort_by_key(|t| t.service_start(anchor));

        let mut busy_until: Option<&Trip> = None;
        for trip in assigned {
            if let Some(prev) = busy_until {
                if overlaps_minutes(
                    prev.service_start(anchor),
                    prev.service_end(anchor),
                    trip.service_start(anchor),
                    trip.service_end(anchor),
                ) {
                    violations.push(Violation::double_booked(
                        train_id,
                        format!(
                            "Train {train_id} assigned to {} ({}-{}) while still on {} ({}-{})",
                            trip.trip_id,
                            trip.start_time,
                            trip.end_time,
                            prev.trip_id,
                            prev.start_time,
                            prev.end_time
                        ),
                    ));
                }
                if trip.service_end(anchor) > prev.service_end(anchor) {
                    busy_until = Some(trip);
                }
            } else {
                busy_until = Some(trip);
            }
        }
    }
    violations
}

/// Finds consecutive same-direction departures closer than `threshold`.
pub fn detect_headway_violations(trips: &[Trip], threshold: i32) -> Vec<Violation> {
    let anchor = service_anchor(trips);
    let mut violations = Vec::new();

    for direction in [Direction::Outbound, Direction::Return] {
        let mut departures: Vec<&Trip> =
            trips.iter().filter(|t| t.direction == direction).collect();
        departures.sort_by_key(|t| t.service_start(anchor));

        for pair in departures.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            let result = headway_minutes(
                prev.service_start(anchor),
                next.service_start(anchor),
                threshold,
            );
            if !result.is_safe {
                violations.push(Violation::headway(
                    &next.trip_id,
                    format!(
                        "{} departs {}m after {} ({} → {}), below {threshold}m",
                        next.trip_id,
                        result.gap_minutes,
                        prev.trip_id,
                        prev.start_time,
                        next.start_time
                    ),
                ));
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClockTime, Train, ViolationType};
    use crate::scheduler::{InductionPolicy, InductionScheduler, SequentialTripIds};

    fn at(h: u32, m: u32) -> ClockTime {
        ClockTime::from_hm(h, m).unwrap()
    }

    fn trip(train: &str, id: &str, dir: Direction, start: ClockTime) -> Trip {
        Trip::new(train, id, dir, start, 75)
    }

    #[test]
    fn test_clean_rotation() {
        // One train, one round trip, then the next outbound after arrival.
        let trips = vec![
            trip("T1", "A", Direction::Outbound, at(6, 0)),
            trip("T1", "B", Direction::Return, at(7, 25)),
            trip("T1", "C", Direction::Outbound, at(8, 40)),
        ];
        assert!(audit(&trips, 5).is_empty());
    }

    #[test]
    fn test_touching_trips_not_double_booked() {
        let trips = vec![
            trip("T1", "A", Direction::Outbound, at(6, 0)),
            trip("T1", "B", Direction::Return, at(7, 15)),
        ];
        assert!(detect_double_booking(&trips).is_empty());
    }

    #[test]
    fn test_double_booking() {
        let trips = vec![
            trip("T1", "A", Direction::Outbound, at(6, 0)),
            trip("T1", "B", Direction::Return, at(7, 25)),
            trip("T1", "C", Direction::Outbound, at(6, 24)),
        ];
        // C starts inside A; B (A's return) then starts inside C.
        let v = detect_double_booking(&trips);
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].violation_type, ViolationType::TrainDoubleBooked);
        assert_eq!(v[0].entity_id, "T1");
        assert!(v[0].message.contains("assigned to C"));
        assert!(v[1].message.contains("assigned to B"));
    }

    #[test]
    fn test_contained_trip_flagged_once_per_overlap() {
        // B and C both start inside A's long window.
        let trips = vec![
            Trip::new("T1", "A", Direction::Outbound, at(6, 0), 300),
            trip("T1", "B", Direction::Return, at(7, 0)),
            trip("T1", "C", Direction::Outbound, at(9, 0)),
        ];
        assert_eq!(detect_double_booking(&trips).len(), 2);
    }

    #[test]
    fn test_other_trains_ignored() {
        let trips = vec![
            trip("T1", "A", Direction::Outbound, at(6, 0)),
            trip("T2", "B", Direction::Outbound, at(6, 12)),
        ];
        assert!(detect_double_booking(&trips).is_empty());
    }

    #[test]
    fn test_double_booking_past_midnight() {
        let trips = vec![
            trip("T1", "A", Direction::Return, at(23, 20)),
            Trip::new("T1", "B", Direction::Outbound, at(23, 50), 10),
        ];
        assert_eq!(detect_double_booking(&trips).len(), 1);
    }

    #[test]
    fn test_return_departing_after_midnight_double_booked() {
        // 22:35 round returns at 00:00; the 23:55 round is still out then.
        let policy = InductionPolicy::default()
            .with_service_window(at(22, 35), at(23, 59))
            .with_headways(5, 80);
        let trips = InductionScheduler::new()
            .with_policy(policy)
            .with_id_source(SequentialTripIds::default())
            .generate(&[Train::new("T1")], 1.0)
            .unwrap();
        assert_eq!(trips.len(), 4);
        assert_eq!(trips[1].start_time, at(0, 0));
        assert_eq!(trips[2].start_time, at(23, 55));

        let mut schedule = Schedule::from_trips(trips);
        assert_eq!(audit_schedule(&mut schedule, 5), 1);
        let v = &schedule.violations[0];
        assert_eq!(v.violation_type, ViolationType::TrainDoubleBooked);
        assert!(v.message.contains("assigned to TRIP-0002"));
        assert!(v.message.contains("still on TRIP-0003"));
    }

    #[test]
    fn test_headway_sort_after_midnight() {
        // 00:02 follows 23:58 on the service day: a 4m gap, not 1436m.
        let trips = vec![
            trip("T1", "A", Direction::Return, at(22, 0)),
            trip("T2", "B", Direction::Return, at(23, 58)),
            trip("T3", "C", Direction::Return, at(0, 2)),
        ];
        let v = detect_headway_violations(&trips, 5);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].entity_id, "C");
        assert!(v[0].message.contains("4m"));
    }

    #[test]
    fn test_headway_violations() {
        let trips = vec![
            trip("T1", "A", Direction::Outbound, at(8, 0)),
            trip("T2", "B", Direction::Outbound, at(8, 3)),
            trip("T3", "C", Direction::Outbound, at(8, 8)),
            // Different direction does not count against A.
            trip("T4", "D", Direction::Return, at(8, 1)),
        ];
        let v = detect_headway_violations(&trips, 5);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].violation_type, ViolationType::HeadwayViolation);
        assert_eq!(v[0].entity_id, "B");
        assert!(v[0].message.contains("3m"));
    }

    #[test]
    fn test_audit_schedule_records_violations() {
        let mut schedule = Schedule::from_trips(vec![
            trip("T1", "A", Direction::Outbound, at(8, 0)),
            trip("T1", "B", Direction::Outbound, at(8, 3)),
        ]);
        let count = audit_schedule(&mut schedule, 5);
        // Double booking + headway.
        assert_eq!(count, 2);
        assert!(!schedule.is_valid());

        // Re-audit replaces rather than appends.
        assert_eq!(audit_schedule(&mut schedule, 2), 1);
        assert_eq!(schedule.violations.len(), 1);
    }
}
