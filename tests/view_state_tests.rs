use std::sync::Arc;
use std::thread;

use edgefinder::domain::{Column, DealId, SortField, TableView};
use edgefinder::port::{MemoryViewStateStore, ScrollMemory, ViewStateStore};

#[test]
fn scroll_offsets_survive_across_table_instances() {
    let store = Arc::new(MemoryViewStateStore::new());

    ScrollMemory::new(Arc::clone(&store)).save("deals", 480);

    let restored = ScrollMemory::new(Arc::clone(&store));
    assert_eq!(restored.restore("deals"), Some(480));
    assert_eq!(restored.restore("cards"), None);
}

#[test]
fn concurrent_writers_do_not_lose_tables() {
    let store = Arc::new(MemoryViewStateStore::new());

    let handles: Vec<_> = (0..8u32)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || ScrollMemory::new(store).save(&format!("table-{i}"), i * 10))
        })
        .collect();
    for handle in handles {
        handle.join().expect("writer thread");
    }

    assert_eq!(store.len(), 8);
    let memory = ScrollMemory::new(store);
    assert_eq!(memory.restore("table-7"), Some(70));
}

#[test]
fn table_view_round_trips_through_the_store() {
    let store = MemoryViewStateStore::new();

    let mut view = TableView::new();
    view.click_header(SortField::GameTime);
    view.hide(DealId::new("stale-1"));
    view.toggle_favorite(&DealId::new("fav-1"));
    assert!(view.columns.move_column(0, 3));

    store.set("view:deals", serde_json::to_string(&view).unwrap());
    let restored: TableView =
        serde_json::from_str(&store.get("view:deals").unwrap()).unwrap();

    assert_eq!(restored, view);
    assert!(restored.is_hidden(&DealId::new("stale-1")));
    assert!(restored.is_favorite(&DealId::new("fav-1")));
    assert_eq!(restored.columns.columns()[3], Column::ALL[0]);
}
