use floorplan_core::{Layout, PlacedRoom, PlotSize, RoomId, RoomSpec};
use floorplan_session::{SessionStore, StoredGeneration};

fn sample_rooms() -> Vec<RoomSpec> {
    vec![
        RoomSpec::new(RoomId::new(1), 10, 12),
        RoomSpec::new(RoomId::new(2), 15, 8),
    ]
}

fn layout_with_room_at(x: u32) -> Layout {
    let spec = RoomSpec::new(RoomId::new(1), 4, 4);
    Layout::new(Vec::new(), vec![PlacedRoom::new(spec, x, 0, false)])
}

fn stored(layout_count: u32) -> StoredGeneration {
    let layouts = (0..layout_count).map(|i| layout_with_room_at(i * 5)).collect();
    StoredGeneration::new(layouts, PlotSize::new(20, 20), sample_rooms())
}

#[test]
fn stored_records_are_retrievable_by_key() {
    let mut store = SessionStore::new();
    let record = stored(3);
    let key = store.insert(record.clone());

    assert_eq!(store.get(&key), Some(&record));
    assert_eq!(store.len(), 1);
}

#[test]
fn layouts_are_addressable_by_index() {
    let mut store = SessionStore::new();
    let key = store.insert(stored(3));

    assert_eq!(store.layout(&key, 0), Some(&layout_with_room_at(0)));
    assert_eq!(store.layout(&key, 2), Some(&layout_with_room_at(10)));
    assert_eq!(store.layout(&key, 3), None);
}

#[test]
fn keys_are_unique_even_for_identical_requests() {
    let mut store = SessionStore::new();
    let first = store.insert(stored(2));
    let second = store.insert(stored(2));

    assert_ne!(first, second);
    assert_eq!(store.len(), 2);
}

#[test]
fn pages_clamp_into_the_valid_range() {
    let mut store = SessionStore::new();
    let key = store.insert(stored(25));

    let first = store.page(&key, 0, 10).expect("record exists");
    assert_eq!(first.page(), 1);
    assert_eq!(first.pages(), 3);
    assert_eq!(first.first_index(), 0);
    assert_eq!(first.layouts().len(), 10);

    let last = store.page(&key, 99, 10).expect("record exists");
    assert_eq!(last.page(), 3);
    assert_eq!(last.first_index(), 20);
    assert_eq!(last.layouts().len(), 5);
}

#[test]
fn zero_per_page_is_treated_as_one() {
    let mut store = SessionStore::new();
    let key = store.insert(stored(3));

    let page = store.page(&key, 2, 0).expect("record exists");
    assert_eq!(page.pages(), 3);
    assert_eq!(page.layouts().len(), 1);
}

#[test]
fn empty_records_and_unknown_keys_have_no_pages() {
    let mut store = SessionStore::new();
    let empty_key = store.insert(stored(0));
    assert!(store.page(&empty_key, 1, 10).is_none());

    let other_key = {
        let mut other_store = SessionStore::new();
        other_store.insert(stored(1))
    };
    assert!(store.page(&other_key, 1, 10).is_none());
}
