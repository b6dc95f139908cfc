//! Thread-safe registry handle
//!
//! One coarse lock covers the endpoint collection and every queue inside it.
//! No endpoint reference ever leaves the lock, so a teardown can never run
//! underneath an in-flight send or receive on the same endpoint.

use crate::endpoint::EndpointInfo;
use crate::error::RegistryError;
use crate::registry::{EndpointRegistry, SendReceipt};
use core_types::{ProcessId, RelayConfig};
use ipc::Message;
use std::sync::{Arc, Mutex};

/// Cloneable handle to a registry shared between callers
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<EndpointRegistry>>,
}

impl SharedRegistry {
    /// Creates a handle to a fresh, uninitialized registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing registry
    pub fn from_registry(registry: EndpointRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// Runs `f` with exclusive access to the registry
    ///
    /// Everything `f` does happens under a single lock acquisition, which
    /// lets callers compose check-then-act sequences atomically.
    pub fn with<R>(&self, f: impl FnOnce(&mut EndpointRegistry) -> R) -> Result<R, RegistryError> {
        let mut guard = self.inner.lock().map_err(|_| RegistryError::Poisoned)?;
        Ok(f(&mut guard))
    }

    fn try_with<R>(
        &self,
        f: impl FnOnce(&mut EndpointRegistry) -> Result<R, RegistryError>,
    ) -> Result<R, RegistryError> {
        self.with(f)?
    }

    /// See [`EndpointRegistry::initialize`]
    pub fn initialize(&self, config: RelayConfig) -> Result<(), RegistryError> {
        self.try_with(|registry| registry.initialize(config))
    }

    /// See [`EndpointRegistry::register`]
    pub fn register(&self, pid: ProcessId, name: &str) -> Result<(), RegistryError> {
        self.try_with(|registry| registry.register(pid, name))
    }

    /// See [`EndpointRegistry::unregister`]
    pub fn unregister(&self, pid: ProcessId, name: &str) -> Result<(), RegistryError> {
        self.try_with(|registry| registry.unregister(pid, name))
    }

    /// See [`EndpointRegistry::send`]
    pub fn send(
        &self,
        from: ProcessId,
        to: &str,
        body: impl Into<String>,
    ) -> Result<SendReceipt, RegistryError> {
        self.try_with(|registry| registry.send(from, to, body))
    }

    /// See [`EndpointRegistry::receive`]
    pub fn receive(&self, pid: ProcessId) -> Result<Option<Message>, RegistryError> {
        self.try_with(|registry| registry.receive(pid))
    }

    /// See [`EndpointRegistry::depth`]
    pub fn depth(&self, pid: ProcessId) -> Result<usize, RegistryError> {
        self.try_with(|registry| registry.depth(pid))
    }

    /// See [`EndpointRegistry::teardown_all`]
    pub fn teardown_all(&self) -> Result<usize, RegistryError> {
        self.with(EndpointRegistry::teardown_all)
    }

    /// See [`EndpointRegistry::endpoints`]
    pub fn endpoints(&self) -> Result<Vec<EndpointInfo>, RegistryError> {
        self.with(|registry| registry.endpoints())
    }

    /// See [`EndpointRegistry::count`]
    pub fn count(&self) -> Result<usize, RegistryError> {
        self.with(|registry| registry.count())
    }
}
