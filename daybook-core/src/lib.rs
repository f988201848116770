//! Core types for daybook.
//!
//! - `EventStore`: the in-memory list of events and its four operations
//! - `Event` and `EventDate`: the event record and its day-comparable date
//! - `DaybookConfig`: user configuration read from the config directory

pub mod config;
pub mod error;
pub mod event;
pub mod event_date;
pub mod store;

pub use config::DaybookConfig;
pub use error::{DaybookError, DaybookResult};
pub use event::Event;
pub use event_date::EventDate;
pub use store::EventStore;
