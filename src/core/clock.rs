//! # SimClock: the shared time anchor for one simulation run.
//!
//! Set once when the simulation starts; everything downstream (narration
//! timestamps, last-meal anchoring, hunger measurement) is expressed as time
//! elapsed since this anchor. Copyable, so every actor carries its own copy
//! instead of reaching for ambient global state.

use std::time::{Duration, Instant};

/// Monotonic time anchor, set at simulation start.
#[derive(Debug, Clone, Copy)]
pub struct SimClock {
    started: Instant,
}

impl SimClock {
    /// Anchors the clock at the current instant.
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Time elapsed since the simulation started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_elapsed_moves_forward() {
        let clock = SimClock::start();
        let a = clock.elapsed();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let b = clock.elapsed();
        assert!(b > a);
    }
}
