use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use chrono::Local;
use parking_lot::Mutex;
use treelog::config::StoreConfig;
use treelog::{
    EVICTION_BATCH, Error, LogEntry, LogInfo, LogLevel, LogStore, MAX_LOGS, StoreEvent,
    generate_tree,
};

fn entry(value: usize) -> LogEntry {
    LogEntry::new(
        generate_tree(&value),
        LogInfo::new(LogLevel::Info, Local::now(), ""),
    )
}

fn labels(store: &LogStore) -> Vec<String> {
    store
        .entries()
        .iter()
        .map(|e| e.node().label().to_string())
        .collect()
}

#[test]
fn appends_keep_chronological_order() {
    let store = LogStore::default();
    assert!(store.is_empty());
    for i in 0..5 {
        store.append(entry(i));
    }
    assert_eq!(store.len(), 5);
    assert_eq!(labels(&store), ["0", "1", "2", "3", "4"]);
    assert_eq!(store.last().map(|e| e.node().label().to_string()), Some("4".into()));
}

#[test]
fn overflow_evicts_a_whole_batch() {
    let store = LogStore::default();
    assert_eq!(store.capacity(), MAX_LOGS);
    assert_eq!(store.eviction_batch(), EVICTION_BATCH);

    for i in 0..MAX_LOGS {
        store.append(entry(i));
    }
    assert_eq!(store.len(), MAX_LOGS);

    store.append(entry(MAX_LOGS));
    assert_eq!(store.len(), MAX_LOGS - EVICTION_BATCH + 1);

    let entries = store.entries();
    assert_eq!(entries[0].node().label(), EVICTION_BATCH.to_string());
    assert_eq!(
        entries.last().map(|e| e.node().label().to_string()),
        Some(MAX_LOGS.to_string())
    );
}

#[test]
fn small_store_rotates() {
    let store = LogStore::new(StoreConfig {
        max_logs: 4,
        eviction_batch: 2,
    })
    .unwrap();

    for i in 0..7 {
        store.append(entry(i));
        assert!(store.len() <= 4);
    }
    // 0..4 fills, 4 evicts {0, 1}, 6 evicts {2, 3}.
    assert_eq!(labels(&store), ["4", "5", "6"]);
}

#[test]
fn invalid_limits_are_rejected() {
    let err = LogStore::new(StoreConfig {
        max_logs: 0,
        eviction_batch: 1,
    })
    .unwrap_err();
    assert!(matches!(err, Error::InvalidConfig { key: "store.max_logs", .. }));
}

#[test]
fn clear_notifies_once_per_call() {
    let store = LogStore::default();
    let cleared = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&cleared);
    store.on_cleared(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    store.append(entry(1));
    store.clear();
    assert!(store.is_empty());
    assert_eq!(cleared.load(Ordering::SeqCst), 1);

    store.clear();
    assert_eq!(cleared.load(Ordering::SeqCst), 2);
}

#[test]
fn added_observers_run_in_registration_order() {
    let store = LogStore::default();
    let seen = Arc::new(Mutex::new(Vec::new()));

    for tag in ["first", "second"] {
        let seen = Arc::clone(&seen);
        store.on_added(move |entry| {
            seen.lock().push(format!("{tag}:{}", entry.node().label()));
        });
    }

    store.append(entry(7));
    assert_eq!(*seen.lock(), ["first:7", "second:7"]);
}

#[test]
fn unsubscribe_stops_notifications() {
    let store = LogStore::default();
    let added = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&added);
    let id = store.on_added(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    store.append(entry(1));
    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.append(entry(2));
    assert_eq!(added.load(Ordering::SeqCst), 1);
}

#[test]
fn channel_receives_every_event() {
    let store = LogStore::default();
    let events = store.subscribe_channel();

    let appended = store.append(entry(3));
    store.clear();

    match events.try_recv().unwrap() {
        StoreEvent::Added(entry) => assert!(Arc::ptr_eq(&entry, &appended)),
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(events.try_recv().unwrap(), StoreEvent::Cleared);
    assert!(events.try_recv().is_err());
}

#[test]
fn dropped_channels_are_pruned() {
    let store = LogStore::default();
    let events = store.subscribe_channel();
    drop(events);

    store.append(entry(1));
    // The observer was pruned during the append, so there is nothing left to remove.
    let id = store.on_cleared(|| {});
    assert!(store.unsubscribe(id));
    assert!(format!("{store:?}").contains("observers: 0"));
}

#[test]
fn stalled_channel_is_dropped_once_full() {
    let store = LogStore::new(StoreConfig {
        max_logs: 4,
        eviction_batch: 2,
    })
    .unwrap();
    let events = store.subscribe_channel();

    for i in 0..6 {
        store.append(entry(i));
    }

    // Four events fit; the fifth disconnects the subscriber.
    let labels: Vec<String> = events
        .try_iter()
        .map(|event| match event {
            StoreEvent::Added(entry) => entry.node().label().to_string(),
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    assert_eq!(labels, ["0", "1", "2", "3"]);
    assert!(events.recv().is_err());
    assert!(format!("{store:?}").contains("observers: 0"));
}

#[test]
fn search_returns_matching_entries_in_order() {
    let store = LogStore::default();
    store.append(LogEntry::new(
        generate_tree(&"Player spawned"),
        LogInfo::new(LogLevel::Info, Local::now(), ""),
    ));
    store.append(entry(1));
    store.append(LogEntry::new(
        generate_tree(&"player died"),
        LogInfo::new(LogLevel::Warn, Local::now(), ""),
    ));

    let found: Vec<_> = store
        .search("PLAYER")
        .iter()
        .map(|e| e.node().label().to_string())
        .collect();
    assert_eq!(found, ["Player spawned", "player died"]);
}

#[test]
fn snapshots_are_independent_of_later_mutation() {
    let store = LogStore::default();
    store.append(entry(1));
    let snapshot = store.entries();
    store.clear();
    assert_eq!(snapshot.len(), 1);
}

#[test]
fn store_is_shareable_across_threads() {
    let store = Arc::new(LogStore::default());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..100 {
                    store.append(entry(t * 100 + i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(store.len(), 400);
}
