//! Resilience Test Utilities
//!
//! This crate provides shared utilities for resilience and integration tests.
//!
//! ## Test Philosophy
//!
//! - **Uniqueness under churn**: No two live endpoints ever share a process ID
//!   or a name, whatever sequence of operations ran
//! - **Bounded memory**: A queue never holds more than its capacity
//! - **Safe teardown**: Removing an endpoint can never race a send or receive

use core_types::{ProcessId, RelayConfig};
use services_registry::{EndpointInfo, EndpointRegistry, SharedRegistry};
use std::collections::HashSet;

/// Bootstrap helper for tests
///
/// Creates an initialized registry with the given queue parameters.
pub fn test_bootstrap(capacity: usize, max_payload_len: usize) -> EndpointRegistry {
    EndpointRegistry::with_config(RelayConfig::new(capacity, max_payload_len))
        .expect("test configuration must be valid")
}

/// Same as [`test_bootstrap`], behind a shared handle
pub fn shared_bootstrap(capacity: usize, max_payload_len: usize) -> SharedRegistry {
    SharedRegistry::from_registry(test_bootstrap(capacity, max_payload_len))
}

/// Shorthand for a process ID
pub fn pid(raw: u32) -> ProcessId {
    ProcessId::from_raw(raw)
}

/// Asserts that no two endpoints share a process ID or a name, and that both
/// indices agree with the endpoint list
pub fn assert_unique_keys(registry: &EndpointRegistry) {
    let endpoints = registry.endpoints();
    assert_eq!(endpoints.len(), registry.count());

    let mut pids = HashSet::new();
    let mut names = HashSet::new();
    for EndpointInfo { pid, name, .. } in &endpoints {
        assert!(pids.insert(*pid), "duplicate process id {}", pid);
        assert!(names.insert(name.clone()), "duplicate name {}", name);
        assert_eq!(registry.pid_of(name.as_str()), Some(*pid));
        assert_eq!(registry.name_of(*pid), Some(name));
    }
}

/// Asserts that every queue is within `capacity`
pub fn assert_bounded(registry: &EndpointRegistry, capacity: usize) {
    for endpoint in registry.endpoints() {
        assert!(
            endpoint.depth <= capacity,
            "{} holds {} messages, capacity {}",
            endpoint.name,
            endpoint.depth,
            capacity
        );
    }
}
