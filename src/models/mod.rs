//! Metro scheduling domain models.
//!
//! Provides the data types exchanged with the induction scheduler and the
//! conflict audit.
//!
//! # Domain Mappings
//!
//! | metro-induction | Operations term |
//! |-----------------|-----------------|
//! | ClockTime | Timetable minute |
//! | Train | Trainset / rake |
//! | Trip | Service run (one direction) |
//! | Schedule | Day timetable |

mod schedule;
mod time;
mod train;
mod trip;

pub use schedule::{Schedule, Violation, ViolationType};
pub use time::{ClockTime, MINUTES_PER_DAY};
pub use train::{eligible_trains, Train, TrainStatus};
pub use trip::{service_anchor, Direction, Trip, TripStatus};
