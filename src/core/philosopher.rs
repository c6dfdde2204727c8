//! # Philosopher: the lifecycle state machine of one seat.
//!
//! Each philosopher cycles Thinking → AcquiringForks → Eating → Sleeping →
//! Thinking until it finishes its meal target, the simulation is halted, or
//! its watchdog kills it.
//!
//! ```text
//! loop {
//!   ├─► ThinkingStarted
//!   ├─► target reached?          ─► Finished
//!   ├─► stop signal halted?      ─► Stopped / Dead
//!   ├─► ThinkingStopped, dine():
//!   │     acquire lower fork   (cancellable wait)
//!   │     re-check run flag    ─► release, Stopped / Dead
//!   │     acquire higher fork  (cancellable wait)
//!   │     re-check run flag    ─► release both, Stopped / Dead
//!   │     EatingStarted, eat   (NOT interruptible: both forks are held)
//!   │     record last meal, put both forks down
//!   └─► rest(): cancellable sleep, then think again
//! }
//! ```
//!
//! ## Rules
//! - Forks are always acquired lower index first ([`Table::ordered_pair`]);
//!   this is what keeps the ring deadlock-free.
//! - Fork waits and the post-meal sleep are `select!`s against the stop
//!   signal, never fixed-increment polling.
//! - Eating is not interrupted once both forks are held; the philosopher is
//!   not the one starving. The last-meal timestamp is recorded when eating
//!   **completes**.
//! - A halted philosopher releases whatever it holds before exiting.
//! - The death event is published by the watchdog that committed the kill;
//!   the philosopher's own task only reports `Fate::Dead` in its outcome.

use std::sync::Arc;
use std::time::Duration;

use tokio::{select, time};

use crate::config::SimConfig;
use crate::core::{clock::SimClock, stop::StopSignal, vitals::Vitals};
use crate::events::{Bus, Event, EventKind};
use crate::report::{Fate, Outcome};
use crate::table::{Fork, Table};

/// Outcome of one lifecycle phase: either the loop continues, or the stop
/// signal cut the phase short.
enum Progress {
    Advanced,
    Halted,
}

/// One seat's agent. Spawned by the [`Simulation`](crate::Simulation), never
/// self-spawning.
pub(crate) struct Philosopher {
    seat: usize,
    table: Arc<Table>,
    clock: SimClock,
    stop: Arc<StopSignal>,
    vitals: Arc<Vitals>,
    bus: Bus,
    target_meals: u32,
    eat_for: Duration,
    sleep_for: Duration,
    meals: u32,
}

impl Philosopher {
    pub(crate) fn new(
        seat: usize,
        table: Arc<Table>,
        clock: SimClock,
        stop: Arc<StopSignal>,
        vitals: Arc<Vitals>,
        bus: Bus,
        cfg: &SimConfig,
    ) -> Self {
        Self {
            seat,
            table,
            clock,
            stop,
            vitals,
            bus,
            target_meals: cfg.target_meals,
            eat_for: cfg.eat_for,
            sleep_for: cfg.sleep_for,
            meals: 0,
        }
    }

    /// Runs the lifecycle until a terminal state, then reports the outcome.
    pub(crate) async fn run(mut self) -> Outcome {
        let fate = self.live().await;
        self.vitals.retire();

        match fate {
            Fate::Finished => self.bus.publish(
                self.event(EventKind::PhilosopherFinished)
                    .with_meal(self.meals),
            ),
            Fate::Stopped => self
                .bus
                .publish(self.event(EventKind::PhilosopherStopped)),
            // The winning watchdog already published the death; Interrupted
            // is reported by the controller for tasks that never get here.
            Fate::Dead | Fate::Interrupted => {}
        }

        Outcome {
            seat: self.seat,
            fate,
            meals: self.meals,
        }
    }

    async fn live(&mut self) -> Fate {
        loop {
            self.bus.publish(self.event(EventKind::ThinkingStarted));
            if !self.stop.is_running() {
                return self.halted_fate();
            }
            if self.meals >= self.target_meals {
                return Fate::Finished;
            }

            self.bus.publish(self.event(EventKind::ThinkingStopped));
            if let Progress::Halted = self.dine().await {
                return self.halted_fate();
            }
            if let Progress::Halted = self.rest().await {
                return self.halted_fate();
            }
        }
    }

    /// One eat attempt: acquire both forks in index order, eat, release.
    async fn dine(&mut self) -> Progress {
        let table = Arc::clone(&self.table);
        let (first, second) = table.ordered_pair(self.seat);

        self.bus
            .publish(self.event(EventKind::ForkRequested).with_fork(first.id()));
        if let Progress::Halted = self.claim(first).await {
            return Progress::Halted;
        }
        if !self.stop.is_running() {
            first.release();
            return Progress::Halted;
        }
        self.bus
            .publish(self.event(EventKind::ForkPickedUp).with_fork(first.id()));

        self.bus
            .publish(self.event(EventKind::ForkRequested).with_fork(second.id()));
        if let Progress::Halted = self.claim(second).await {
            first.release();
            return Progress::Halted;
        }
        if !self.stop.is_running() {
            first.release();
            second.release();
            return Progress::Halted;
        }
        self.bus
            .publish(self.event(EventKind::ForkPickedUp).with_fork(second.id()));

        self.bus.publish(
            self.event(EventKind::EatingStarted)
                .with_meal(self.meals + 1)
                .with_duration(self.eat_for),
        );
        // Both forks are held; the meal runs to completion.
        time::sleep(self.eat_for).await;
        self.vitals.record_meal(self.clock.elapsed());

        first.release();
        self.bus
            .publish(self.event(EventKind::ForkPutDown).with_fork(first.id()));
        second.release();
        self.bus
            .publish(self.event(EventKind::ForkPutDown).with_fork(second.id()));

        self.meals += 1;
        Progress::Advanced
    }

    /// Post-meal sleep, cut short by the stop signal.
    async fn rest(&self) -> Progress {
        self.bus.publish(
            self.event(EventKind::SleepingStarted)
                .with_duration(self.sleep_for),
        );
        select! {
            _ = time::sleep(self.sleep_for) => Progress::Advanced,
            _ = self.stop.halted() => Progress::Halted,
        }
    }

    /// Waits for one fork, giving up if the simulation halts first.
    ///
    /// The fork's claim happens inside a single poll, so losing the select
    /// can never leave the fork half-claimed.
    async fn claim(&self, fork: &Fork) -> Progress {
        select! {
            _ = fork.acquire() => Progress::Advanced,
            _ = self.stop.halted() => Progress::Halted,
        }
    }

    /// A halted philosopher is Dead if its own watchdog killed it, Stopped
    /// if the halt came from elsewhere.
    fn halted_fate(&self) -> Fate {
        if self.vitals.is_alive() {
            Fate::Stopped
        } else {
            Fate::Dead
        }
    }

    fn event(&self, kind: EventKind) -> Event {
        Event::at(self.clock.elapsed(), kind).with_seat(self.seat)
    }
}
