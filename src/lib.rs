//! # tablevisor
//!
//! **Tablevisor** is a dining-philosophers simulation runtime. It puts N
//! philosophers around a ring of N forks, lets them think, eat, and sleep
//! concurrently, and watches each of them with a starvation watchdog: a
//! philosopher that cannot get both of its forks in time dies, and one death
//! halts the whole table.
//!
//! The crate demonstrates the classic resource-contention hazards and their
//! mitigations: deadlock (prevented by index-ordered fork acquisition),
//! starvation (detected by per-seat watchdogs), and lost wakeups (avoided by
//! broadcast-wake forks with recheck-before-claim).
//!
//! ## Architecture
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  Simulation (controller)                                       │
//! │  - Table (ring of N forks)                                     │
//! │  - StopSignal (one-way run flag, exactly-once death claim)     │
//! │  - Bus (broadcast events) ─► SubscriberSet ─► ConsoleNarrator  │
//! └─────┬───────────────┬───────────────┬──────────────────────────┘
//!       ▼               ▼               ▼
//!  ┌───────────┐   ┌───────────┐   ┌───────────┐
//!  │ Philosopher│  │ Philosopher│  │ Philosopher│   (one task per seat)
//!  │ + Watchdog │  │ + Watchdog │  │ + Watchdog │   (one monitor each)
//!  └─────┬──────┘  └─────┬──────┘  └─────┬──────┘
//!        │  think ─► acquire lower fork ─► acquire higher fork      │
//!        │        ─► eat ─► put both down ─► sleep ─► think …       │
//!        └── watchdog: hungry too long? ─► trip StopSignal (once) ──┘
//! ```
//!
//! Philosophers and watchdogs synchronize only through fork state, each
//! seat's vitals, and the shared stop signal. A death, an OS signal, or the
//! last philosopher finishing all halt the run; the [`SimReport`] counts
//! survivors and deaths.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tablevisor::{ConsoleNarrator, SimConfig, Simulation, Subscribe};
//!
//! #[tokio::main(flavor = "multi_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut cfg = SimConfig::default();
//!     cfg.seats = 3;
//!     cfg.target_meals = 2;
//!     cfg.eat_for = Duration::from_millis(50);
//!     cfg.sleep_for = Duration::from_millis(10);
//!     cfg.starve_after = Duration::from_secs(10);
//!
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(ConsoleNarrator::new())];
//!     let sim = Simulation::new(cfg, subs);
//!
//!     let report = sim.run().await?;
//!     println!("survivors: {}, deaths: {}", report.survivors(), report.deaths());
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod report;
mod subscribers;
mod table;

// ---- Public re-exports ----

pub use config::SimConfig;
pub use core::Simulation;
pub use error::{ConfigError, SimError};
pub use events::{Bus, Event, EventKind};
pub use report::{Fate, Outcome, SimReport};
pub use subscribers::{ConsoleNarrator, Subscribe, SubscriberSet};
pub use table::{Fork, Table};
