//! Concurrent Access Tests
//!
//! Validates that the shared registry stays consistent when many callers
//! register, send, receive and tear down at the same time.

use relay_device::RelayDevice;
use services_registry::{RegistryError, SharedRegistry};
use std::sync::{Arc, Barrier};
use std::thread;
use tests_resilience::{assert_bounded, assert_unique_keys, pid, shared_bootstrap};

const THREADS: u32 = 8;

/// Test: Racing registrations for the same name admit exactly one winner
#[test]
fn test_racing_registrations_single_winner() {
    let registry = shared_bootstrap(4, 16);
    let barrier = Arc::new(Barrier::new(THREADS as usize));

    let handles: Vec<_> = (0..THREADS)
        .map(|raw| {
            let registry = registry.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry.register(pid(raw), "contested")
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    for result in results.iter().filter(|r| r.is_err()) {
        assert_eq!(
            result,
            &Err(RegistryError::DuplicateName("contested".to_string()))
        );
    }

    registry.with(|r| assert_unique_keys(r)).unwrap();
}

/// Test: Queues stay bounded and per-sender FIFO under concurrent senders
#[test]
fn test_concurrent_senders_bounded_queue() {
    let capacity = 16;
    let registry = shared_bootstrap(capacity, 32);
    registry.register(pid(0), "sink").unwrap();
    for raw in 1..=THREADS {
        registry.register(pid(raw), &format!("src{}", raw)).unwrap();
    }

    let handles: Vec<_> = (1..=THREADS)
        .map(|raw| {
            let registry = registry.clone();
            thread::spawn(move || {
                for i in 0..200 {
                    registry
                        .send(pid(raw), "sink", format!("{}:{}", raw, i))
                        .unwrap();
                }
            })
        })
        .collect();

    let reader = {
        let registry = registry.clone();
        thread::spawn(move || {
            let mut last = vec![None::<u32>; THREADS as usize + 1];
            for _ in 0..2000 {
                if let Some(message) = registry.receive(pid(0)).unwrap() {
                    let (sender, seq) = message.body.split_once(':').unwrap();
                    let sender: usize = sender.parse().unwrap();
                    let seq: u32 = seq.parse().unwrap();
                    assert_eq!(message.sender.as_raw() as usize, sender);
                    if let Some(previous) = last[sender] {
                        assert!(seq > previous, "sender {} went backwards", sender);
                    }
                    last[sender] = Some(seq);
                }
            }
        })
    };

    for handle in handles {
        handle.join().unwrap();
    }
    reader.join().unwrap();

    registry
        .with(|r| {
            assert_bounded(r, capacity);
            assert_unique_keys(r);
        })
        .unwrap();
}

/// Test: Unregistering while others send never corrupts the registry
///
/// Senders see either success or `DestinationNotFound`, never anything else.
#[test]
fn test_unregister_races_with_send() {
    let registry = shared_bootstrap(4, 16);
    registry.register(pid(0), "sender").unwrap();

    let churner = {
        let registry = registry.clone();
        thread::spawn(move || {
            for _ in 0..500 {
                registry.register(pid(1), "target").unwrap();
                registry.unregister(pid(1), "target").unwrap();
            }
        })
    };

    let sender = {
        let registry = registry.clone();
        thread::spawn(move || {
            for i in 0..500 {
                match registry.send(pid(0), "target", format!("n{}", i)) {
                    Ok(_) | Err(RegistryError::DestinationNotFound(_)) => {}
                    Err(other) => panic!("unexpected send error: {}", other),
                }
            }
        })
    };

    churner.join().unwrap();
    sender.join().unwrap();

    assert_eq!(registry.count().unwrap(), 1);
    registry.with(|r| assert_unique_keys(r)).unwrap();
}

/// Test: Teardown while callers are active leaves a clean, uninitialized
/// registry and every caller sees a well-defined error afterwards
#[test]
fn test_teardown_during_traffic() {
    let registry = shared_bootstrap(8, 16);
    for raw in 0..THREADS {
        registry.register(pid(raw), &format!("ep{}", raw)).unwrap();
    }

    let handles: Vec<_> = (0..THREADS)
        .map(|raw| {
            let registry = registry.clone();
            thread::spawn(move || {
                let peer = format!("ep{}", (raw + 1) % THREADS);
                for _ in 0..200 {
                    match registry.send(pid(raw), &peer, "x") {
                        Ok(_) | Err(RegistryError::NotInitialized) => {}
                        Err(other) => panic!("unexpected send error: {}", other),
                    }
                    match registry.receive(pid(raw)) {
                        Ok(_) | Err(RegistryError::NotInitialized) => {}
                        Err(other) => panic!("unexpected receive error: {}", other),
                    }
                }
            })
        })
        .collect();

    let released = registry.teardown_all().unwrap();
    assert_eq!(released, THREADS as usize);

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(registry.count().unwrap(), 0);
    assert!(registry.endpoints().unwrap().is_empty());
}

/// Test: Device handles shared across threads see one registry
#[test]
fn test_device_clones_share_registry() {
    let registry = SharedRegistry::new();
    let device = RelayDevice::new(registry.clone());
    assert!(matches!(
        device.write(pid(1), b"/reg early"),
        Err(relay_device::DeviceError::Registry(
            RegistryError::NotInitialized
        ))
    ));

    registry
        .initialize(core_types::RelayConfig::new(2, 8))
        .unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|raw| {
            let device = device.clone();
            thread::spawn(move || {
                let command = format!("/reg p{}", raw);
                device.write(pid(raw), command.as_bytes()).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.count().unwrap(), THREADS as usize);
    registry.with(|r| assert_unique_keys(r)).unwrap();
}
