//! # Fork: a binary mutual-exclusion resource shared by two neighbors.
//!
//! A fork is either on the table (available) or in someone's hand. Claiming
//! is a single atomic compare-exchange, so no two concurrent callers can both
//! succeed. Blocked waiters park on a [`Notify`] and are woken **all at once**
//! when the fork is released; each woken waiter re-checks availability before
//! claiming, so a wakeup that loses the race simply goes back to waiting.
//!
//! ```text
//! acquire():                        release():
//!   loop {                            free = true
//!     arm wakeup                      notify_waiters()  (broadcast)
//!     try_acquire()? ─► claimed
//!     await wakeup
//!   }
//! ```
//!
//! ## Rules
//! - `release()` must only be called by the current holder; this is a caller
//!   invariant, not enforced here.
//! - The claim happens inside a single poll of the `acquire()` future, so
//!   dropping the future mid-wait (e.g. losing a `select!`) can never leak
//!   a held fork.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// One fork on the table, identified by its ring index.
#[derive(Debug)]
pub struct Fork {
    id: usize,
    free: AtomicBool,
    returned: Notify,
}

impl Fork {
    /// Creates an available fork with the given index.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            free: AtomicBool::new(true),
            returned: Notify::new(),
        }
    }

    /// Returns the fork's ring index.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Non-blocking claim attempt.
    ///
    /// Returns `true` if the fork was available and is now held by the
    /// caller. At most one of any set of concurrent callers succeeds.
    pub fn try_acquire(&self) -> bool {
        self.free
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Waits until the fork is available, then claims it.
    ///
    /// Uses the arm/recheck/await pattern so a release between the failed
    /// claim and the wait cannot be missed. Multiple waiters may be woken by
    /// one release; only one of them will claim, the rest re-arm and wait.
    pub async fn acquire(&self) {
        let wakeup = self.returned.notified();
        tokio::pin!(wakeup);
        loop {
            // Arm before checking, otherwise a release in between is lost.
            wakeup.as_mut().enable();
            if self.try_acquire() {
                return;
            }
            wakeup.as_mut().await;
            wakeup.set(self.returned.notified());
        }
    }

    /// Puts the fork back on the table and wakes every waiter.
    pub fn release(&self) {
        self.free.store(true, Ordering::Release);
        self.returned.notify_waiters();
    }

    /// True if the fork is currently on the table.
    pub fn is_free(&self) -> bool {
        self.free.load(Ordering::Acquire)
    }
}
