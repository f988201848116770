use daybook_core::{Event, EventDate, EventStore};
use rstest::{fixture, rstest};

fn day(s: &str) -> EventDate {
    s.parse().unwrap()
}

#[fixture]
fn store() -> EventStore {
    EventStore::new()
}

#[rstest]
fn standup_lifecycle(mut store: EventStore) {
    let standup = Event::new("1", "Standup", day("2024-05-01"));
    store.add_event(standup.clone());
    assert_eq!(store.events_by_date(&day("2024-05-01")), vec![standup]);

    let moved = Event::new("1", "Standup v2", day("2024-05-02"));
    store.update_event(moved.clone());
    assert!(store.events_by_date(&day("2024-05-01")).is_empty());
    assert_eq!(store.events_by_date(&day("2024-05-02")), vec![moved]);

    store.delete_event("1");
    assert!(store.events_by_date(&day("2024-05-02")).is_empty());
    assert!(store.is_empty());
}

#[rstest]
fn delete_on_empty_store_is_silent(mut store: EventStore) {
    store.delete_event("nonexistent");
    assert!(store.is_empty());
}

#[rstest]
fn added_event_is_found_on_its_own_date(mut store: EventStore) {
    let dates = [
        "2024-05-01",
        "2024-05-01T09:00",
        "2024-05-01T23:59:00Z",
        "2024-05-01T00:30:00+02:00",
        "2024-05-01T23:30[Europe/Amsterdam]",
    ];

    for (n, date) in dates.iter().enumerate() {
        let event = Event::new(n.to_string(), "Check", day(date));
        store.add_event(event.clone());
        assert!(store.events_by_date(&event.date).contains(&event), "{date}");
    }
}

#[rstest]
fn lookup_returns_exactly_the_matching_subset(mut store: EventStore) {
    let added = [
        ("a", "2024-05-01T08:00:00Z"),
        ("b", "2024-05-02T08:00:00Z"),
        ("c", "2024-05-01"),
        ("d", "2024-04-30T23:00:00Z"),
        ("e", "2024-05-01T20:00"),
        ("f", "2024-05-03"),
    ];
    for (id, date) in added {
        store.add_event(Event::new(id, id.to_uppercase(), day(date)));
    }

    let found: Vec<String> = store
        .events_by_date(&day("2024-05-01"))
        .into_iter()
        .map(|e| e.id)
        .collect();

    assert_eq!(found, vec!["a", "c", "e"]);
}

#[rstest]
fn update_of_unknown_id_leaves_store_unchanged(mut store: EventStore) {
    store.add_event(Event::new("1", "One", day("2024-05-01")));
    store.add_event(Event::new("2", "Two", day("2024-05-02")));
    let before = store.events().to_vec();

    store.update_event(Event::new("3", "Three", day("2024-05-03")));

    assert_eq!(store.len(), 2);
    assert_eq!(store.events(), before.as_slice());
}

#[rstest]
fn delete_removes_every_event_sharing_an_id(mut store: EventStore) {
    store.add_event(Event::new("dup", "First", day("2024-05-01")));
    store.add_event(Event::new("dup", "Second", day("2024-05-01")));

    store.delete_event("dup");

    assert!(store.events_by_date(&day("2024-05-01")).is_empty());
}
