//! Error types for configuration and the simulation runtime.
//!
//! - [`ConfigError`] — invalid [`SimConfig`](crate::SimConfig) parameters,
//!   caught before anything is spawned.
//! - [`SimError`] — failures of the run itself. Note that a starvation death
//!   is **not** an error: it is an expected terminal outcome reported through
//!   [`SimReport`](crate::SimReport).

use std::time::Duration;
use thiserror::Error;

/// Invalid simulation parameters.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The ring needs at least two seats.
    #[error("a dining ring needs at least 2 seats (got {seats})")]
    NotEnoughSeats {
        /// The configured seat count.
        seats: usize,
    },

    /// The watchdog cannot poll at a zero interval.
    #[error("watchdog poll interval must be non-zero")]
    ZeroWatchdogPoll,
}

/// Failures of the simulation run.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SimError {
    /// The configuration was rejected before the run started.
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    /// An external shutdown was requested, but some philosophers did not
    /// stop within the grace period.
    #[error("shutdown grace {grace:?} exceeded; still seated: {stuck:?}")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Seats that never reported a terminal outcome.
        stuck: Vec<usize>,
    },
}

impl SimError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use tablevisor::{ConfigError, SimError};
    ///
    /// let err = SimError::from(ConfigError::NotEnoughSeats { seats: 1 });
    /// assert_eq!(err.as_label(), "invalid_config");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SimError::InvalidConfig(_) => "invalid_config",
            SimError::GraceExceeded { .. } => "grace_exceeded",
        }
    }
}
