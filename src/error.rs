//! Error types for metro-induction.

use thiserror::Error;

/// Result type for metro-induction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the headway engine, the generator, and schedule updates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A clock-time string is not a valid `"HH:MM"` value.
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),

    /// The generator was called with an empty train roster.
    #[error("No eligible trains available for scheduling")]
    NoEligibleTrains,

    /// An induction policy failed validation.
    #[error("Invalid induction policy: {0}")]
    InvalidPolicy(String),

    /// A policy document could not be parsed.
    #[error("Policy config error: {0}")]
    Config(String),

    /// A trip lookup by id found nothing.
    #[error("Trip not found: {0}")]
    TripNotFound(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
