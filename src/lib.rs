//! Train-induction scheduling for a two-terminus metro line.
//!
//! Generates a day's round-trip timetable from a roster of eligible trains
//! and a passenger load factor, and checks timetables for headway and
//! double-booking conflicts. Pure computation: no I/O, no global state.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ClockTime`, `Train`, `Trip`, `Schedule`,
//!   `Violation`
//! - **`headway`**: Time arithmetic: parse/format, duration, overlap,
//!   headway classification
//! - **`scheduler`**: `InductionScheduler`, `InductionPolicy`, trip id
//!   sources, `ScheduleKpi`
//! - **`validation`**: Conflict audit over generated trips
//!
//! # Example
//!
//! ```
//! use metro_induction::models::{eligible_trains, Schedule, Train, TrainStatus};
//! use metro_induction::scheduler::InductionScheduler;
//! use metro_induction::validation::audit_schedule;
//!
//! let fleet = vec![
//!     Train::new("T-101"),
//!     Train::new("T-102").with_status(TrainStatus::Maintenance),
//!     Train::new("T-103"),
//! ];
//! let trains = eligible_trains(&fleet);
//!
//! let trips = InductionScheduler::new().generate(&trains, 1.0).unwrap();
//! let mut schedule = Schedule::from_trips(trips);
//! let conflicts = audit_schedule(&mut schedule, 5);
//! assert_eq!(conflicts, schedule.violations.len());
//! ```

pub mod error;
pub mod headway;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Error, Result};
