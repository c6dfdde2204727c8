//! # Simulation events emitted by philosophers, watchdogs, and the controller.
//!
//! [`EventKind`] classifies everything that happens at the table:
//! - **Lifecycle events**: thinking, fork pickup/putdown, eating, sleeping
//! - **Terminal events**: a philosopher finishing, stopping, dying, or being
//!   interrupted
//! - **Run events**: simulation start/end and external shutdown requests
//!
//! [`Event`] carries the elapsed simulation time plus optional metadata such
//! as the seat, the fork index, or how long a philosopher went hungry.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::Duration;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of simulation events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Run events ===
    /// The table is set and all philosophers are about to start.
    ///
    /// Sets: `at`, `seq`.
    SimulationStarted,

    /// Every philosopher has reached a terminal state.
    ///
    /// Sets: `at`, `seq`.
    SimulationEnded,

    /// External shutdown requested (OS termination signal observed).
    ///
    /// Sets: `at`, `seq`.
    ShutdownRequested,

    // === Lifecycle events ===
    /// Philosopher started thinking.
    ///
    /// Sets: `seat`, `at`, `seq`.
    ThinkingStarted,

    /// Philosopher stopped thinking and is about to reach for forks.
    ///
    /// Sets: `seat`, `at`, `seq`.
    ThinkingStopped,

    /// Philosopher is reaching for one fork and may block on it.
    ///
    /// Sets: `seat`, `fork`, `at`, `seq`.
    ForkRequested,

    /// Philosopher picked up one fork.
    ///
    /// Sets: `seat`, `fork`, `at`, `seq`.
    ForkPickedUp,

    /// Philosopher put one fork back on the table.
    ///
    /// Sets: `seat`, `fork`, `at`, `seq`.
    ForkPutDown,

    /// Philosopher holds both forks and started eating.
    ///
    /// Sets: `seat`, `meal` (1-based), `duration_ms`, `at`, `seq`.
    EatingStarted,

    /// Philosopher started sleeping after a meal.
    ///
    /// Sets: `seat`, `duration_ms`, `at`, `seq`.
    SleepingStarted,

    // === Terminal events ===
    /// Philosopher ate its target number of meals and left the table.
    ///
    /// Sets: `seat`, `meal` (total meals eaten), `at`, `seq`.
    PhilosopherFinished,

    /// Philosopher stopped because the simulation was halted.
    ///
    /// Sets: `seat`, `at`, `seq`.
    PhilosopherStopped,

    /// Philosopher starved to death; this event also means the whole
    /// simulation is coming down.
    ///
    /// Sets: `seat`, `hungry_ms`, `at`, `seq`.
    PhilosopherDied,

    /// Philosopher task was torn down abnormally (panic or runtime
    /// cancellation) and never reported an outcome.
    ///
    /// Sets: `reason`, `at`, `seq`; `seat` when known.
    PhilosopherInterrupted,
}

/// Simulation event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: elapsed time since simulation start (for narration)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Elapsed time since the simulation started.
    pub at: Duration,
    /// Event classification.
    pub kind: EventKind,

    /// Seat index of the philosopher, if applicable.
    pub seat: Option<usize>,
    /// Fork index, for pickup/putdown events.
    pub fork: Option<usize>,
    /// Meal number (1-based) or total meals, depending on the kind.
    pub meal: Option<u32>,
    /// How long the philosopher had gone without eating (ms), for deaths.
    pub hungry_ms: Option<u64>,
    /// Planned phase duration in milliseconds (eating/sleeping).
    pub duration_ms: Option<u64>,
    /// Human-readable reason (interruptions, shutdown details).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind at the given elapsed time,
    /// with the next global sequence number.
    pub fn at(at: Duration, kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at,
            kind,
            seat: None,
            fork: None,
            meal: None,
            hungry_ms: None,
            duration_ms: None,
            reason: None,
        }
    }

    /// Attaches a seat index.
    #[inline]
    pub fn with_seat(mut self, seat: usize) -> Self {
        self.seat = Some(seat);
        self
    }

    /// Attaches a fork index.
    #[inline]
    pub fn with_fork(mut self, fork: usize) -> Self {
        self.fork = Some(fork);
        self
    }

    /// Attaches a meal number.
    #[inline]
    pub fn with_meal(mut self, meal: u32) -> Self {
        self.meal = Some(meal);
        self
    }

    /// Attaches how long the philosopher had gone hungry (stored as ms).
    #[inline]
    pub fn with_hunger(mut self, d: Duration) -> Self {
        self.hungry_ms = Some(d.as_millis().min(u128::from(u64::MAX)) as u64);
        self
    }

    /// Attaches a phase duration (stored as ms).
    #[inline]
    pub fn with_duration(mut self, d: Duration) -> Self {
        self.duration_ms = Some(d.as_millis().min(u128::from(u64::MAX)) as u64);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::at(Duration::ZERO, EventKind::SimulationStarted);
        let b = Event::at(Duration::ZERO, EventKind::SimulationEnded);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_builders_set_fields() {
        let ev = Event::at(Duration::from_millis(42), EventKind::PhilosopherDied)
            .with_seat(2)
            .with_hunger(Duration::from_millis(1003));
        assert_eq!(ev.at, Duration::from_millis(42));
        assert_eq!(ev.seat, Some(2));
        assert_eq!(ev.hungry_ms, Some(1003));

        let ev = Event::at(Duration::ZERO, EventKind::ForkRequested)
            .with_seat(0)
            .with_fork(1);
        assert_eq!(ev.fork, Some(1));
    }
}
