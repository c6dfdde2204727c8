//! # Simulation parameters.
//!
//! [`SimConfig`] bundles every knob of a run: ring size, meal target, phase
//! durations, the starvation deadline, the watchdog poll interval, and the
//! shutdown grace period. The defaults reproduce the classic demonstration:
//! eating takes twice the starvation deadline, so a run with defaults always
//! ends in a death shortly after the first deadline passes.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use tablevisor::SimConfig;
//!
//! let mut cfg = SimConfig::default();
//! cfg.seats = 3;
//! cfg.target_meals = 2;
//! cfg.eat_for = Duration::from_millis(50);
//! assert!(cfg.validate().is_ok());
//! ```

use std::time::Duration;

use crate::error::ConfigError;

/// Parameters for one simulation run.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Number of philosophers (and forks). Must be at least 2.
    pub seats: usize,
    /// Meals each philosopher tries to eat before leaving the table.
    pub target_meals: u32,
    /// How long one meal takes.
    pub eat_for: Duration,
    /// How long a philosopher sleeps after a meal.
    pub sleep_for: Duration,
    /// A philosopher dies after this long without completing a meal.
    pub starve_after: Duration,
    /// How often each watchdog checks its philosopher's vitals.
    ///
    /// Detection latency is bounded by one interval, so keep this well below
    /// `starve_after` (the default is a tenth of it).
    pub watchdog_poll: Duration,
    /// Capacity of the event bus channel.
    pub bus_capacity: usize,
    /// How long an external shutdown waits for philosophers to stop before
    /// giving up on them.
    pub grace: Duration,
}

impl Default for SimConfig {
    /// The fixed parameters of the classic demonstration:
    /// - `seats = 5`, `target_meals = 3`
    /// - `eat_for = 2000ms`, `sleep_for = 2000ms`
    /// - `starve_after = 1000ms`, `watchdog_poll = 100ms`
    /// - `bus_capacity = 1024`, `grace = 10s`
    fn default() -> Self {
        Self {
            seats: 5,
            target_meals: 3,
            eat_for: Duration::from_millis(2000),
            sleep_for: Duration::from_millis(2000),
            starve_after: Duration::from_millis(1000),
            watchdog_poll: Duration::from_millis(100),
            bus_capacity: 1024,
            grace: Duration::from_secs(10),
        }
    }
}

impl SimConfig {
    /// Checks the parameters that cannot be clamped away.
    ///
    /// A ring needs at least two seats: with one seat both "adjacent" forks
    /// are the same fork, and the second acquisition would wait on the
    /// caller itself.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seats < 2 {
            return Err(ConfigError::NotEnoughSeats { seats: self.seats });
        }
        if self.watchdog_poll.is_zero() {
            return Err(ConfigError::ZeroWatchdogPoll);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_single_seat_is_rejected() {
        let cfg = SimConfig { seats: 1, ..SimConfig::default() };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NotEnoughSeats { seats: 1 })
        ));
    }

    #[test]
    fn test_zero_poll_is_rejected() {
        let cfg = SimConfig {
            watchdog_poll: Duration::ZERO,
            ..SimConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroWatchdogPoll)));
    }
}
