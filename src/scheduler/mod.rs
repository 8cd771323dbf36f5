//! Train-induction scheduling and timetable KPIs.
//!
//! # Algorithm
//!
//! `InductionScheduler` walks the service day in headway-sized steps. Each
//! step emits one round trip (outbound + return after turnaround) for the
//! next train in round-robin order, then advances by a headway chosen from
//! the hour of day and the passenger load factor.
//!
//! The policy constants live in [`InductionPolicy`]; trip identifiers come
//! from a [`TripIdSource`] so tests can inject a deterministic one.
//!
//! # KPI
//!
//! `ScheduleKpi` computes rounds, peak share, average headway, per-train
//! utilization, and a conflict-based efficiency score.

mod ids;
mod induction;
mod kpi;
mod policy;

pub use ids::{RandomTripIds, SequentialTripIds, TripIdSource};
pub use induction::{InductionScheduler, ScheduleRequest, DEFAULT_LOAD_FACTOR};
pub use kpi::ScheduleKpi;
pub use policy::{HeadwaySlot, InductionPolicy};
