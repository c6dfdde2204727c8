//! Event consumers: the [`Subscribe`] trait, the [`SubscriberSet`] fan-out,
//! and the built-in [`ConsoleNarrator`].

mod log;
mod set;
mod subscribe;

pub use log::ConsoleNarrator;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
