//! # Event bus for broadcasting simulation events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] that provides
//! non-blocking event publishing from many sources (philosophers, watchdogs,
//! the controller).
//!
//! ```text
//! Publishers (many):                    Subscriber (one):
//!   Philosopher 0 ──┐
//!   Philosopher N ──┼────► Bus ───────► subscriber_listener ───► SubscriberSet
//!   Watchdog 0..N ──┤  (broadcast)        (in Simulation)
//!   Simulation    ──┘
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks.
//! - **Bounded capacity**: a single ring buffer stores recent events.
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip
//!   the `n` oldest items.
//! - **No persistence**: events are lost if nobody is subscribed at send time.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for simulation events.
///
/// Cheap to clone (internally holds an `Arc`-backed sender); multiple
/// publishers can publish concurrently and subscribers receive clones of
/// each event.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (clamped to >= 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Event>(capacity);
        Self { tx }
    }

    /// Publishes an event to all active subscribers.
    ///
    /// If there are no receivers the event is dropped; this function still
    /// returns immediately.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver that will observe subsequent events.
    ///
    /// Each call creates an independent receiver; a receiver only gets events
    /// sent after it subscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use std::time::Duration;

    #[tokio::test]
    async fn test_subscriber_receives_published_events() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        bus.publish(Event::at(Duration::ZERO, EventKind::SimulationStarted));
        let got = rx.recv().await.unwrap();
        assert_eq!(got.kind, EventKind::SimulationStarted);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_does_not_block() {
        let bus = Bus::new(1);
        for _ in 0..64 {
            bus.publish(Event::at(Duration::ZERO, EventKind::ThinkingStarted));
        }
    }
}
