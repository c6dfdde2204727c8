//! # Vitals: shared state between one philosopher and its watchdog.
//!
//! Strictly single-writer per field:
//! - the philosopher writes the last-meal timestamp (after every completed
//!   meal) and the retired flag (once, on exit);
//! - the watchdog writes the alive flag (once, on a committed kill).
//!
//! The other side only reads, so plain atomics with release/acquire ordering
//! give the required visibility; no lock is involved.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

/// Liveness record for one seat.
#[derive(Debug)]
pub struct Vitals {
    /// Elapsed simulation time of the last completed meal, in ms.
    /// Starts at zero: the clock of starvation runs from simulation start.
    last_meal_ms: AtomicU64,
    alive: AtomicBool,
    retired: AtomicBool,
}

impl Vitals {
    /// Fresh vitals: alive, not retired, last meal at simulation start.
    pub fn new() -> Self {
        Self {
            last_meal_ms: AtomicU64::new(0),
            alive: AtomicBool::new(true),
            retired: AtomicBool::new(false),
        }
    }

    /// Records a completed meal at the given elapsed time.
    pub fn record_meal(&self, at: Duration) {
        self.last_meal_ms
            .store(at.as_millis().min(u128::from(u64::MAX)) as u64, Ordering::Release);
    }

    /// Elapsed time of the last completed meal.
    pub fn last_meal(&self) -> Duration {
        Duration::from_millis(self.last_meal_ms.load(Ordering::Acquire))
    }

    /// How long the philosopher has gone without finishing a meal.
    pub fn hungry_for(&self, now: Duration) -> Duration {
        now.saturating_sub(self.last_meal())
    }

    /// Marks the philosopher dead. Written only by the watchdog that won
    /// the global death claim.
    pub fn kill(&self) {
        self.alive.store(false, Ordering::Release);
    }

    /// True until the watchdog commits a kill.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Marks the philosopher's task as exited; retires the watchdog.
    pub fn retire(&self) {
        self.retired.store(true, Ordering::Release);
    }

    /// True once the philosopher's task has exited.
    pub fn retired(&self) -> bool {
        self.retired.load(Ordering::Acquire)
    }
}

impl Default for Vitals {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meals_anchor_hunger() {
        let vitals = Vitals::new();
        assert_eq!(vitals.hungry_for(Duration::from_millis(700)), Duration::from_millis(700));

        vitals.record_meal(Duration::from_millis(500));
        assert_eq!(vitals.last_meal(), Duration::from_millis(500));
        assert_eq!(vitals.hungry_for(Duration::from_millis(700)), Duration::from_millis(200));
    }

    #[test]
    fn test_hunger_saturates_before_first_measurement() {
        let vitals = Vitals::new();
        vitals.record_meal(Duration::from_millis(900));
        // A reading taken just before the meal landed must not underflow.
        assert_eq!(vitals.hungry_for(Duration::from_millis(800)), Duration::ZERO);
    }

    #[test]
    fn test_kill_and_retire_flags() {
        let vitals = Vitals::new();
        assert!(vitals.is_alive());
        assert!(!vitals.retired());
        vitals.kill();
        vitals.retire();
        assert!(!vitals.is_alive());
        assert!(vitals.retired());
    }
}
