//! The event record kept by the store.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event_date::EventDate;

/// A calendar event.
///
/// The id is assigned by the caller and is not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: EventDate,
}

impl Event {
    pub fn new(id: impl Into<String>, title: impl Into<String>, date: EventDate) -> Self {
        Event {
            id: id.into(),
            title: title.into(),
            date,
        }
    }

    /// A fresh random id for callers that don't bring their own.
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Whether this event falls on the same calendar day as `date`.
    pub fn is_on(&self, date: &EventDate) -> bool {
        self.date.is_same_day(date)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}
