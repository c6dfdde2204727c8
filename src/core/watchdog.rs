//! # Watchdog: per-seat starvation monitor.
//!
//! One watchdog runs alongside each philosopher, polling its vitals at a
//! fixed interval. When the time since the last completed meal exceeds the
//! starvation deadline, the watchdog tries to commit the death by winning
//! [`StopSignal::claim_death`]. Exactly one watchdog per simulation can win,
//! so a redundant detection (two seats starving in the same tick, or a race
//! with an external shutdown) never double-reports. The winner kills the
//! vitals and publishes the death before halting the signal: the victim's
//! task wakes on the halt and must already see itself dead.
//!
//! ## Rules
//! - Detection latency is bounded by one poll interval; keep the interval
//!   well below the deadline.
//! - The watchdog retires as soon as its philosopher's task has exited or
//!   the simulation halts; it never outlives the run.
//! - The committed death is global: tripping the signal stops every seat.

use std::sync::Arc;
use std::time::Duration;

use tokio::{select, time};

use crate::core::{clock::SimClock, stop::StopSignal, vitals::Vitals};
use crate::events::{Bus, Event, EventKind};

/// Starvation monitor for one seat.
pub(crate) struct Watchdog {
    seat: usize,
    clock: SimClock,
    stop: Arc<StopSignal>,
    vitals: Arc<Vitals>,
    bus: Bus,
    deadline: Duration,
    poll: Duration,
}

impl Watchdog {
    pub(crate) fn new(
        seat: usize,
        clock: SimClock,
        stop: Arc<StopSignal>,
        vitals: Arc<Vitals>,
        bus: Bus,
        deadline: Duration,
        poll: Duration,
    ) -> Self {
        Self {
            seat,
            clock,
            stop,
            vitals,
            bus,
            deadline,
            poll,
        }
    }

    /// Polls until the philosopher retires, the simulation halts, or a
    /// starvation is detected and committed.
    pub(crate) async fn run(self) {
        let mut tick = time::interval(self.poll);
        tick.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            select! {
                _ = self.stop.halted() => return,
                _ = tick.tick() => {}
            }
            if self.vitals.retired() {
                return;
            }

            let hunger = self.vitals.hungry_for(self.clock.elapsed());
            if hunger > self.deadline {
                // First claim wins simulation-wide; losers stay silent.
                // The kill must land before the halt wakes the victim.
                if self.stop.claim_death() {
                    self.vitals.kill();
                    self.bus.publish(
                        Event::at(self.clock.elapsed(), EventKind::PhilosopherDied)
                            .with_seat(self.seat)
                            .with_hunger(hunger),
                    );
                    self.stop.halt();
                }
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Bus;

    fn fixture(deadline_ms: u64, poll_ms: u64) -> (Watchdog, Arc<StopSignal>, Arc<Vitals>, Bus) {
        let clock = SimClock::start();
        let stop = Arc::new(StopSignal::new());
        let vitals = Arc::new(Vitals::new());
        let bus = Bus::new(64);
        let dog = Watchdog::new(
            0,
            clock,
            Arc::clone(&stop),
            Arc::clone(&vitals),
            bus.clone(),
            Duration::from_millis(deadline_ms),
            Duration::from_millis(poll_ms),
        );
        (dog, stop, vitals, bus)
    }

    #[tokio::test]
    async fn test_detects_starvation_and_halts_everything() {
        let (dog, stop, vitals, bus) = fixture(50, 10);
        let mut rx = bus.subscribe();

        dog.run().await;

        assert!(!stop.is_running(), "a death must halt the simulation");
        assert!(!vitals.is_alive());
        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::PhilosopherDied);
        assert_eq!(ev.seat, Some(0));
        assert!(ev.hungry_ms.unwrap() > 50);
    }

    #[tokio::test]
    async fn test_kill_is_visible_before_the_halt_wakes_waiters() {
        // The victim's task decides Dead-vs-Stopped by reading its vitals
        // after waking on the halt; the kill must never lag that wakeup.
        let (dog, stop, vitals, _bus) = fixture(50, 10);

        let victim = {
            let stop = Arc::clone(&stop);
            let vitals = Arc::clone(&vitals);
            tokio::spawn(async move {
                stop.halted().await;
                vitals.is_alive()
            })
        };

        dog.run().await;
        let alive_at_wakeup = tokio::time::timeout(Duration::from_secs(5), victim)
            .await
            .expect("the committed death must halt the run")
            .unwrap();
        assert!(
            !alive_at_wakeup,
            "a seat woken by its own death must report Dead, not Stopped"
        );
    }

    #[tokio::test]
    async fn test_regular_meals_keep_the_watchdog_quiet() {
        let (dog, stop, vitals, _bus) = fixture(100, 10);
        let clock = SimClock::start();

        let feeder = {
            let vitals = Arc::clone(&vitals);
            tokio::spawn(async move {
                for _ in 0..8 {
                    time::sleep(Duration::from_millis(40)).await;
                    vitals.record_meal(clock.elapsed());
                }
                vitals.retire();
            })
        };

        tokio::time::timeout(Duration::from_secs(5), dog.run())
            .await
            .expect("watchdog must retire after its philosopher");
        feeder.await.unwrap();

        assert!(vitals.is_alive(), "a fed philosopher must not be killed");
        assert!(stop.is_running());
    }

    #[tokio::test]
    async fn test_retires_without_killing_when_simulation_halts() {
        let (dog, stop, vitals, bus) = fixture(50, 10);
        let mut rx = bus.subscribe();

        stop.halt();
        time::sleep(Duration::from_millis(80)).await;
        dog.run().await;

        assert!(vitals.is_alive(), "no death may be claimed after shutdown");
        assert!(rx.try_recv().is_err());
    }
}
