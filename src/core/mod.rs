//! Runtime core: the simulation controller and its concurrent units.
//!
//! The only public API from this module is [`Simulation`], which sets the
//! table, spawns the philosophers and their watchdogs, and aggregates the
//! final report.
//!
//! Internal modules:
//! - [`clock`]: shared elapsed-time anchor;
//! - [`stop`]: the one-way run flag with exactly-once death attribution;
//! - [`vitals`]: per-seat state shared between a philosopher and its watchdog;
//! - [`philosopher`]: the lifecycle state machine and fork protocol;
//! - [`watchdog`]: per-seat starvation detection;
//! - [`simulation`]: orchestration, shutdown, statistics;
//! - [`shutdown`]: cross-platform OS termination signals.

mod clock;
mod philosopher;
mod shutdown;
mod simulation;
mod stop;
mod vitals;
mod watchdog;

pub use simulation::Simulation;
