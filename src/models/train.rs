//! Train (rolling stock) model.
//!
//! Trains are owned by the fleet registry; the scheduler consumes them
//! read-only and only needs a stable identifier.

use serde::{Deserialize, Serialize};

/// A trainset available to the induction planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Train {
    /// Unique train identifier (e.g., "T-101").
    pub id: String,
    /// Current operating status.
    pub status: TrainStatus,
}

/// Operating status of a train.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainStatus {
    /// In revenue service.
    #[default]
    Active,
    /// In the depot; not eligible for induction.
    Maintenance,
    /// Parked and ready to be inducted.
    Standby,
    /// Running behind its timetable.
    Delayed,
    /// Running to timetable.
    OnTime,
}

impl Train {
    /// Creates an active train.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: TrainStatus::Active,
        }
    }

    /// Sets the operating status.
    pub fn with_status(mut self, status: TrainStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether this train may be inducted into a timetable.
    pub fn is_eligible(&self) -> bool {
        self.status != TrainStatus::Maintenance
    }
}

/// Filters a fleet roster down to trains eligible for induction.
///
/// Preserves roster order, which fixes the round-robin rotation.
pub fn eligible_trains(fleet: &[Train]) -> Vec<Train> {
    fleet.iter().filter(|t| t.is_eligible()).cloned().collect()
}
