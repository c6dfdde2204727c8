//! Shared resources: the [`Table`] ring and its [`Fork`]s.

mod fork;
mod table;

pub use fork::Fork;
pub use table::Table;
