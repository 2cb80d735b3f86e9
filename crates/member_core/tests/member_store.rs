use member_core::{MemberServiceError, MemberStore, StoreConfig};
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;
const SAVES_PER_THREAD: usize = 25;

#[test]
fn store_lifecycle_covers_every_operation() {
    let store = MemberStore::open_in_memory().unwrap();
    assert_eq!(store.max_id().unwrap(), 0);

    let saved = store.save("A", "a@x", "eng", "bio", vec![1u8, 2]).unwrap();
    assert_eq!(saved.id, 1);
    assert_eq!(store.get_by_id(saved.id).unwrap(), Some(saved.clone()));

    let updated = store
        .update(saved.id, "B", "b@x", "art", "bio2", vec![3u8])
        .unwrap();
    let loaded = store.get_by_id(saved.id).unwrap().unwrap();
    assert_eq!(loaded, updated);
    assert_eq!(loaded.profession, "art");

    assert_eq!(store.delete_by_id(saved.id).unwrap(), 1);
    assert_eq!(store.get_by_id(saved.id).unwrap(), None);

    store.save("C", "c@x", "ops", "bio3", vec![4u8]).unwrap();
    assert_eq!(store.delete_all().unwrap(), 1);
    assert!(store.list_all().unwrap().is_empty());
    assert_eq!(store.max_id().unwrap(), 0);

    store.close().unwrap();
}

#[test]
fn store_reports_missing_member_on_update_and_zero_count_on_delete() {
    let store = MemberStore::open_in_memory().unwrap();

    let err = store
        .update(77, "B", "b@x", "art", "bio", Vec::<u8>::new())
        .unwrap_err();
    assert!(matches!(err, MemberServiceError::MemberNotFound(77)));

    assert_eq!(store.delete_all().unwrap(), 0);
    assert_eq!(store.delete_by_id(77).unwrap(), 0);
}

#[test]
fn file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path().join("members.sqlite3"));

    let store = MemberStore::open_with_config(&config).unwrap();
    let saved = store
        .save("Ada", "ada@example.com", "engineer", "bio", vec![9u8; 64])
        .unwrap();
    store.close().unwrap();

    let reopened = MemberStore::open_with_config(&config).unwrap();
    assert_eq!(reopened.get_by_id(saved.id).unwrap(), Some(saved));
    reopened.close().unwrap();
}

#[test]
fn concurrent_saves_through_shared_store_get_distinct_ids() {
    let store = Arc::new(MemberStore::open_in_memory().unwrap());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..SAVES_PER_THREAD)
                    .map(|n| {
                        store
                            .save(format!("w{worker}-{n}"), "x@x", "eng", "bio", vec![0u8])
                            .unwrap()
                            .id
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: Vec<_> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    let unique: HashSet<_> = ids.iter().copied().collect();

    assert_eq!(ids.len(), THREADS * SAVES_PER_THREAD);
    assert_eq!(unique.len(), ids.len());
    assert_eq!(store.max_id().unwrap(), ids.len() as i64);
}

#[test]
fn concurrent_saves_through_independent_stores_on_one_file_get_distinct_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("members.sqlite3");
    MemberStore::open(&path).unwrap().close().unwrap();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let store = MemberStore::open(&path).unwrap();
                barrier.wait();
                let ids = (0..SAVES_PER_THREAD)
                    .map(|n| {
                        store
                            .save(format!("w{worker}-{n}"), "x@x", "eng", "bio", vec![0u8])
                            .unwrap()
                            .id
                    })
                    .collect::<Vec<_>>();
                store.close().unwrap();
                ids
            })
        })
        .collect();

    let ids: Vec<_> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    let unique: HashSet<_> = ids.iter().copied().collect();
    assert_eq!(unique.len(), THREADS * SAVES_PER_THREAD);

    let store = MemberStore::open(&path).unwrap();
    assert_eq!(store.count().unwrap(), THREADS * SAVES_PER_THREAD);
    store.close().unwrap();
}
