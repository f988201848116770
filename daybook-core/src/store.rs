//! In-memory event store.
//!
//! Holds events in insertion order. Ids are not required to be unique:
//! updates touch the first match, deletes remove every match, and a missing
//! id is never an error.

use tracing::{debug, trace};

use crate::event::Event;
use crate::event_date::EventDate;

#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events falling on the same calendar day as `date`, in insertion order.
    ///
    /// Each stored event's own zone decides which day it is compared in.
    pub fn events_by_date(&self, date: &EventDate) -> Vec<Event> {
        let matches: Vec<Event> = self
            .events
            .iter()
            .filter(|event| event.is_on(date))
            .cloned()
            .collect();

        trace!(%date, count = matches.len(), "events_by_date");
        matches
    }

    /// Append `event`. Duplicate ids are accepted.
    pub fn add_event(&mut self, event: Event) {
        debug!(id = %event.id, date = %event.date, "add_event");
        self.events.push(event);
    }

    /// Replace the first event with the same id, keeping its position.
    /// Does nothing when no event has that id.
    pub fn update_event(&mut self, updated: Event) {
        match self.events.iter().position(|event| event.id == updated.id) {
            Some(index) => {
                debug!(id = %updated.id, index, "update_event: replaced");
                self.events[index] = updated;
            }
            None => {
                debug!(id = %updated.id, "update_event: no event with id, ignoring");
            }
        }
    }

    /// Remove every event with id `event_id`.
    pub fn delete_event(&mut self, event_id: &str) {
        let before = self.events.len();
        self.events.retain(|event| event.id != event_id);

        debug!(
            id = event_id,
            removed = before - self.events.len(),
            "delete_event"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, title: &str, date: &str) -> Event {
        Event::new(id, title, date.parse().unwrap())
    }

    fn day(s: &str) -> EventDate {
        s.parse().unwrap()
    }

    fn ids(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = EventStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.events_by_date(&day("2024-05-01")).is_empty());
    }

    #[test]
    fn test_events_by_date_keeps_insertion_order() {
        let mut store = EventStore::new();
        store.add_event(event("a", "Late", "2024-05-01T18:00:00Z"));
        store.add_event(event("b", "Other day", "2024-05-02"));
        store.add_event(event("c", "Early", "2024-05-01T07:00:00Z"));
        store.add_event(event("d", "All day", "2024-05-01"));

        let found = store.events_by_date(&day("2024-05-01"));
        assert_eq!(ids(&found), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_events_by_date_returns_a_copy() {
        let mut store = EventStore::new();
        store.add_event(event("1", "Standup", "2024-05-01"));

        let mut found = store.events_by_date(&day("2024-05-01"));
        found[0].title = "Changed".to_string();
        found.clear();

        assert_eq!(store.len(), 1);
        assert_eq!(store.events()[0].title, "Standup");
    }

    #[test]
    fn test_add_event_accepts_duplicate_ids() {
        let mut store = EventStore::new();
        store.add_event(event("1", "First", "2024-05-01"));
        store.add_event(event("1", "Second", "2024-05-01"));

        assert_eq!(store.len(), 2);
        assert_eq!(store.events_by_date(&day("2024-05-01")).len(), 2);
    }

    #[test]
    fn test_update_event_replaces_in_place() {
        let mut store = EventStore::new();
        store.add_event(event("1", "One", "2024-05-01"));
        store.add_event(event("2", "Two", "2024-05-01"));
        store.add_event(event("3", "Three", "2024-05-01"));

        store.update_event(event("2", "Two v2", "2024-06-01"));

        assert_eq!(ids(store.events()), vec!["1", "2", "3"]);
        assert_eq!(store.events()[0], event("1", "One", "2024-05-01"));
        assert_eq!(store.events()[1], event("2", "Two v2", "2024-06-01"));
        assert_eq!(store.events()[2], event("3", "Three", "2024-05-01"));
    }

    #[test]
    fn test_update_event_only_touches_first_duplicate() {
        let mut store = EventStore::new();
        store.add_event(event("1", "First", "2024-05-01"));
        store.add_event(event("1", "Second", "2024-05-01"));

        store.update_event(event("1", "Updated", "2024-05-03"));

        assert_eq!(store.events()[0].title, "Updated");
        assert_eq!(store.events()[1].title, "Second");
    }

    #[test]
    fn test_update_event_unknown_id_is_noop() {
        let mut store = EventStore::new();
        store.add_event(event("1", "Standup", "2024-05-01"));
        let before = store.events().to_vec();

        store.update_event(event("missing", "Ghost", "2024-05-01"));

        assert_eq!(store.events(), before.as_slice());
    }

    #[test]
    fn test_delete_event_removes_all_matches() {
        let mut store = EventStore::new();
        store.add_event(event("1", "First", "2024-05-01"));
        store.add_event(event("2", "Keep", "2024-05-01"));
        store.add_event(event("1", "Second", "2024-05-02"));

        store.delete_event("1");

        assert_eq!(ids(store.events()), vec!["2"]);
    }

    #[test]
    fn test_delete_event_unknown_id_is_noop() {
        let mut store = EventStore::new();
        store.delete_event("nonexistent");
        assert!(store.is_empty());

        store.add_event(event("1", "Standup", "2024-05-01"));
        store.delete_event("nonexistent");
        assert_eq!(ids(store.events()), vec!["1"]);
    }

    #[test]
    fn test_store_can_be_shared_behind_a_mutex() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EventStore>();

        let store = std::sync::Arc::new(std::sync::Mutex::new(EventStore::new()));
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store
                        .lock()
                        .unwrap()
                        .add_event(event(&n.to_string(), "Parallel", "2024-05-01"));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.lock().unwrap().len(), 4);
    }
}
