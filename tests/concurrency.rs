//! Concurrent Access Tests

use std::thread;

use manifests::{Manifests, StringSource};

#[test]
fn test_concurrent_disjoint_appends_are_all_visible() {
    let registry = Manifests::new();
    let writers = 8;
    let per_writer = 50;

    thread::scope(|scope| {
        for w in 0..writers {
            let registry = &registry;
            scope.spawn(move || {
                for i in 0..per_writer {
                    let doc = format!("Writer-{}-Key-{}: {}\n", w, i, i);
                    registry.append(&StringSource::new(doc)).unwrap();
                }
            });
        }
    });

    assert_eq!(registry.size(), writers * per_writer);
    assert_eq!(registry.get("Writer-3-Key-7").as_deref(), Some("7"));
}

#[test]
fn test_concurrent_appends_to_one_key_keep_every_value() {
    let registry = Manifests::new();
    let writers = 6;

    thread::scope(|scope| {
        for w in 0..writers {
            let registry = &registry;
            scope.spawn(move || {
                registry
                    .append(&StringSource::new(format!("Shared: {}\n", w)))
                    .unwrap();
            });
        }
    });

    let history = registry.all_values("Shared");
    assert_eq!(history.len(), writers);
    // Whichever append landed first owns the point value
    assert_eq!(registry.get("Shared"), history.first().cloned());
}

#[test]
fn test_readers_never_see_half_written_entries() {
    let registry = Manifests::new();

    thread::scope(|scope| {
        let reader = &registry;
        scope.spawn(move || {
            for _ in 0..1_000 {
                for name in reader.key_set() {
                    // A visible name always has its history entry too
                    assert!(!reader.all_values(&name).is_empty());
                }
            }
        });

        let writer = &registry;
        scope.spawn(move || {
            for i in 0..200 {
                writer
                    .append(&StringSource::new(format!("Key-{}: {}\n", i, i)))
                    .unwrap();
            }
        });
    });

    assert_eq!(registry.size(), 200);
}
