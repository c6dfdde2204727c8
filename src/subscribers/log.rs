//! # ConsoleNarrator: the line-oriented stdout narration stream.
//!
//! Prints one `[<elapsed>ms]`-prefixed line per event, reproducing the
//! classic dining-table narration: think start/stop, two fork requests and
//! pickups, eat start, two fork putdowns, sleep start, and the terminal
//! lines for deaths, finishes, and stops.
//!
//! ## Output format
//! ```text
//! [     0ms] simulation started
//! [     1ms] philosopher 0 started thinking
//! [     1ms] philosopher 0 stopped thinking
//! [     1ms] philosopher 0 is reaching for fork 0
//! [     2ms] philosopher 0 picked up fork 0
//! [     2ms] philosopher 0 is reaching for fork 1
//! [     2ms] philosopher 0 picked up fork 1
//! [     2ms] philosopher 0 started eating for 2000ms (meal 1)
//! [  1004ms] philosopher 2 died of starvation (1004ms without a meal)
//! [  1004ms] the simulation is halting: a philosopher has died
//! [  2003ms] philosopher 0 stopped (simulation halted)
//! [  2003ms] simulation ended
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Stdout narration subscriber.
#[derive(Debug, Default)]
pub struct ConsoleNarrator;

impl ConsoleNarrator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for ConsoleNarrator {
    async fn on_event(&self, event: &Event) {
        let ms = event.at.as_millis();
        let seat = event.seat.unwrap_or_default();
        match event.kind {
            EventKind::SimulationStarted => {
                println!("[{ms:>6}ms] simulation started");
            }
            EventKind::SimulationEnded => {
                println!("[{ms:>6}ms] simulation ended");
            }
            EventKind::ShutdownRequested => {
                println!("[{ms:>6}ms] shutdown requested, waiting for the table to clear");
            }
            EventKind::ThinkingStarted => {
                println!("[{ms:>6}ms] philosopher {seat} started thinking");
            }
            EventKind::ThinkingStopped => {
                println!("[{ms:>6}ms] philosopher {seat} stopped thinking");
            }
            EventKind::ForkRequested => {
                if let Some(fork) = event.fork {
                    println!("[{ms:>6}ms] philosopher {seat} is reaching for fork {fork}");
                }
            }
            EventKind::ForkPickedUp => {
                if let Some(fork) = event.fork {
                    println!("[{ms:>6}ms] philosopher {seat} picked up fork {fork}");
                }
            }
            EventKind::ForkPutDown => {
                if let Some(fork) = event.fork {
                    println!("[{ms:>6}ms] philosopher {seat} put down fork {fork}");
                }
            }
            EventKind::EatingStarted => {
                let meal = event.meal.unwrap_or_default();
                let dur = event.duration_ms.unwrap_or_default();
                println!("[{ms:>6}ms] philosopher {seat} started eating for {dur}ms (meal {meal})");
            }
            EventKind::SleepingStarted => {
                let dur = event.duration_ms.unwrap_or_default();
                println!("[{ms:>6}ms] philosopher {seat} is sleeping for {dur}ms");
            }
            EventKind::PhilosopherFinished => {
                let meals = event.meal.unwrap_or_default();
                println!("[{ms:>6}ms] philosopher {seat} finished eating {meals} meals");
            }
            EventKind::PhilosopherStopped => {
                println!("[{ms:>6}ms] philosopher {seat} stopped (simulation halted)");
            }
            EventKind::PhilosopherDied => {
                let hungry = event.hungry_ms.unwrap_or_default();
                println!(
                    "[{ms:>6}ms] philosopher {seat} died of starvation ({hungry}ms without a meal)"
                );
                println!("[{ms:>6}ms] the simulation is halting: a philosopher has died");
            }
            EventKind::PhilosopherInterrupted => {
                let reason = event.reason.as_deref().unwrap_or("unknown");
                println!("[{ms:>6}ms] a philosopher task was interrupted: {reason}");
            }
        }
    }

    fn name(&self) -> &'static str {
        "console-narrator"
    }
}
