use std::sync::Arc;

use serde_json::json;

use tw_store::{LatestItineraryStore, LatestRecord, SaveSource};

#[test]
fn concurrent_saves_leave_one_consistent_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(LatestItineraryStore::new(dir.path()).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                store
                    .save(LatestRecord::new(json!({"writer": i}), SaveSource::Generate))
                    .unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let in_memory = store.get().unwrap();
    let on_disk = LatestItineraryStore::new(dir.path()).unwrap().get().unwrap();
    assert_eq!(in_memory, on_disk);
    assert!(in_memory.itinerary["writer"].as_u64().unwrap() < 8);
}
