//! # Table: a fixed ring of forks.
//!
//! The table owns exactly one fork per seat, indexed `0..seats`. Seat `s` is
//! adjacent to forks `s` (left) and `(s + 1) % seats` (right). The collection
//! never changes after construction; all mutation goes through the forks
//! themselves.
//!
//! ## Deadlock avoidance
//! [`Table::ordered_pair`] returns a seat's two forks **lower index first**.
//! Every philosopher acquires in that order, so fork indices impose one total
//! order shared by the whole ring: a cycle in the wait-for graph would need
//! someone to hold a higher-indexed fork while waiting for a lower-indexed
//! one, which never happens. The naive left-then-right policy deadlocks when
//! all seats grab their left fork at once; index ordering breaks that cycle
//! at the wrap-around seat, which reaches for fork `0` first.

use super::fork::Fork;

/// Fixed-size ring of forks, one per seat.
#[derive(Debug)]
pub struct Table {
    forks: Vec<Fork>,
}

impl Table {
    /// Sets a table with `seats` forks, indexed `0..seats`.
    pub fn new(seats: usize) -> Self {
        Self {
            forks: (0..seats).map(Fork::new).collect(),
        }
    }

    /// Number of seats (and forks) at the table.
    pub fn seats(&self) -> usize {
        self.forks.len()
    }

    /// The fork at `index`.
    ///
    /// Indices are derived from seat numbers at construction time, so an
    /// out-of-range index is a programming error and panics.
    pub fn fork(&self, index: usize) -> &Fork {
        &self.forks[index]
    }

    /// The two fork indices adjacent to `seat`: `(left, right)`.
    pub fn adjacent(&self, seat: usize) -> (usize, usize) {
        (seat, (seat + 1) % self.seats())
    }

    /// The two forks adjacent to `seat`, lower index first.
    ///
    /// This is the acquisition order; see the module docs.
    pub fn ordered_pair(&self, seat: usize) -> (&Fork, &Fork) {
        let (left, right) = self.adjacent(seat);
        let (first, second) = if left < right { (left, right) } else { (right, left) };
        (self.fork(first), self.fork(second))
    }
}
