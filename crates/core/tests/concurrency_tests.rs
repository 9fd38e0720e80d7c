//! Resolution from several threads at once
//!
//! Independent call chains on different threads must never trip each
//! other's circular dependency guard, and singletons must stay single.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use ddinject_core::Container;

struct Slow {
    id: usize,
}

#[test]
fn test_concurrent_resolution_does_not_report_cycles() {
    let mut container = Container::new();
    container
        .add_transient("slow", |_| {
            thread::sleep(Duration::from_millis(20));
            Ok(Slow { id: 7 })
        })
        .unwrap();
    let container = Arc::new(container);
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let container = container.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                container.resolve::<Slow>("slow").map(|slow| slow.id)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), 7);
    }
}

#[test]
fn test_concurrent_singleton_caches_one_instance() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();

    let mut container = Container::new();
    container
        .add_singleton("config", move |_| {
            counted.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(10));
            Ok(String::from("loaded"))
        })
        .unwrap();
    let container = Arc::new(container);

    let resolved: Vec<Arc<String>> = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| container.resolve::<String>("config").unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // Racing first resolutions may each run the provider, but only one
    // result is cached and every caller gets that one.
    let racing_calls = calls.load(Ordering::SeqCst);
    assert!((1..=4).contains(&racing_calls));

    let cached = container.resolve::<String>("config").unwrap();
    assert!(resolved.iter().all(|value| Arc::ptr_eq(value, &cached)));
    assert_eq!(calls.load(Ordering::SeqCst), racing_calls);
}

#[test]
fn test_cycle_detected_on_worker_thread() {
    let mut container = Container::new();
    container
        .add("left", |deps| deps.get::<u8>("right").map(|v| *v))
        .unwrap()
        .add("right", |deps| deps.get::<u8>("left").map(|v| *v))
        .unwrap();
    let container = Arc::new(container);

    let worker = {
        let container = container.clone();
        thread::spawn(move || container.resolve::<u8>("left").unwrap_err().is_circular())
    };

    assert!(worker.join().unwrap());
    assert!(container.resolve::<u8>("right").unwrap_err().is_circular());
}
