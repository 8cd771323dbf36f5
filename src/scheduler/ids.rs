//! Trip identifier sources.

use rand::Rng;
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Supplies trip identifiers to the scheduler.
///
/// Implementations must return distinct ids for every call made during
/// one generation run. Shared across threads, so `next_id` takes `&self`.
pub trait TripIdSource: Send + Sync + Debug {
    /// Returns a fresh trip identifier.
    fn next_id(&self) -> String;
}

/// Time-stamped ids with a random suffix: `TRIP-{epoch_ms}-{seq}-{rand}`.
///
/// The sequence number keeps ids distinct when many are minted in the same
/// millisecond.
#[derive(Debug, Default)]
pub struct RandomTripIds {
    counter: AtomicU64,
}

impl RandomTripIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TripIdSource for RandomTripIds {
    fn next_id(&self) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let suffix: u32 = rand::rng().random_range(0..1000);
        format!("TRIP-{millis}-{seq}-{suffix:03}")
    }
}

/// Deterministic ids: `{prefix}-0001`, `{prefix}-0002`, ...
#[derive(Debug)]
pub struct SequentialTripIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialTripIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl Default for SequentialTripIds {
    fn default() -> Self {
        Self::new("TRIP")
    }
}

impl TripIdSource for SequentialTripIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{n:04}", self.prefix)
    }
}
