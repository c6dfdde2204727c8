//! # StopSignal: the simulation-wide run flag.
//!
//! One `StopSignal` is shared by every philosopher and watchdog in a run. It
//! only ever moves one way: running → halted. Two paths lead there:
//!
//! - [`StopSignal::claim_death`] then [`StopSignal::halt`] — the death path.
//!   The claim is first-writer-wins: exactly one caller gets `true` per
//!   simulation, which makes it the committed death and entitles (and
//!   obliges) it to publish the death event and then halt. The claim does
//!   NOT halt by itself: the winner writes the victim's vitals between the
//!   claim and the halt, so every task woken by the halt already sees the
//!   kill. Redundant detections (two watchdogs racing, or a watchdog racing
//!   an external shutdown) lose the swap and report nothing.
//! - [`StopSignal::halt`] alone — the external shutdown path (OS signal, end
//!   of run). Halts without claiming a death.
//!
//! Waiting is a [`CancellationToken`] wait, so blocked fork acquisitions and
//! timed sleeps can `select!` against [`StopSignal::halted`] instead of
//! polling a boolean in fixed increments.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio_util::sync::CancellationToken;

/// One-way broadcast stop flag with exactly-once death attribution.
#[derive(Debug, Default)]
pub struct StopSignal {
    token: CancellationToken,
    tripped: AtomicBool,
}

impl StopSignal {
    /// Creates a signal in the running state.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while nobody has halted the simulation.
    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Completes once the simulation has been halted (by a death or an
    /// external shutdown).
    pub async fn halted(&self) {
        self.token.cancelled().await;
    }

    /// Death path: claims the death without halting yet.
    ///
    /// Returns `true` for exactly one caller per simulation; `false` if the
    /// simulation was already halted or another caller won the claim. The
    /// winner must finish committing the death (kill the vitals, publish the
    /// event) and then call [`StopSignal::halt`] — anything it writes in
    /// between is visible to every task the halt wakes.
    pub fn claim_death(&self) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        !self.tripped.swap(true, Ordering::AcqRel)
    }

    /// Shutdown path: halts the simulation without claiming a death.
    pub fn halt(&self) {
        self.token.cancel();
    }
}
