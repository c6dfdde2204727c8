//! # Final statistics: per-seat outcomes and the run summary.
//!
//! Every philosopher task resolves to exactly one [`Outcome`]; the
//! [`Simulation`](crate::Simulation) collects them into a [`SimReport`].
//! A death is a normal terminal outcome of the simulation, not a controller
//! failure: it shows up here, not as an `Err`.

use std::time::Duration;

/// Terminal state of one philosopher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    /// Ate the target number of meals.
    Finished,
    /// Exited cleanly because the simulation was halted.
    Stopped,
    /// Starved: its watchdog committed the death.
    Dead,
    /// Task was torn down abnormally (panic) and never reported back.
    Interrupted,
}

/// How one philosopher's run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Seat index.
    pub seat: usize,
    /// Terminal state.
    pub fate: Fate,
    /// Meals completed before the run ended.
    pub meals: u32,
}

impl Outcome {
    /// A philosopher survives unless it starved.
    pub fn survived(&self) -> bool {
        self.fate != Fate::Dead
    }
}

/// Summary of a finished simulation.
#[derive(Debug, Clone)]
pub struct SimReport {
    /// Wall-clock duration of the whole run.
    pub elapsed: Duration,
    /// One outcome per seat, ordered by seat index.
    pub outcomes: Vec<Outcome>,
}

impl SimReport {
    /// Number of philosophers that did not starve.
    pub fn survivors(&self) -> usize {
        self.outcomes.iter().filter(|o| o.survived()).count()
    }

    /// Number of starvation deaths.
    pub fn deaths(&self) -> usize {
        self.outcomes.iter().filter(|o| o.fate == Fate::Dead).count()
    }

    /// Number of philosophers that reached their meal target.
    pub fn finished(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.fate == Fate::Finished)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_fate() {
        let report = SimReport {
            elapsed: Duration::from_millis(1234),
            outcomes: vec![
                Outcome { seat: 0, fate: Fate::Finished, meals: 3 },
                Outcome { seat: 1, fate: Fate::Dead, meals: 0 },
                Outcome { seat: 2, fate: Fate::Stopped, meals: 1 },
            ],
        };
        assert_eq!(report.survivors(), 2);
        assert_eq!(report.deaths(), 1);
        assert_eq!(report.finished(), 1);
    }

    #[test]
    fn test_interrupted_counts_as_survivor() {
        let o = Outcome { seat: 0, fate: Fate::Interrupted, meals: 0 };
        assert!(o.survived());
    }
}
