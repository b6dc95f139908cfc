//! Endpoint registry
//!
//! Owns every endpoint and routes messages between them by name.

use crate::endpoint::{Endpoint, EndpointInfo};
use crate::error::RegistryError;
use core_types::{EndpointName, ProcessId, RelayConfig};
use ipc::{EndpointQueue, Message, MessageId, PushOutcome, QueueError};
use std::collections::HashMap;
use std::num::NonZeroUsize;
use tracing::{debug, info, warn};

/// Result of a successful send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendReceipt {
    /// ID assigned to the queued message
    pub message_id: MessageId,
    /// Whether an older message was overwritten to make room
    pub outcome: PushOutcome,
}

/// Live registry state, present only once initialized
#[derive(Debug)]
struct RegistryState {
    config: RelayConfig,
    capacity: NonZeroUsize,
    /// Endpoints by owning process
    endpoints: HashMap<ProcessId, Endpoint>,
    /// Name index into `endpoints`
    names: HashMap<EndpointName, ProcessId>,
    /// Registration order
    order: Vec<ProcessId>,
}

impl RegistryState {
    fn new(config: RelayConfig) -> Result<Self, RegistryError> {
        config.validate()?;
        let capacity = NonZeroUsize::new(config.capacity)
            .ok_or(core_types::ConfigError::InvalidCapacity(config.capacity))?;
        Ok(Self {
            config,
            capacity,
            endpoints: HashMap::new(),
            names: HashMap::new(),
            order: Vec::new(),
        })
    }
}

/// Endpoint registry
///
/// Every endpoint is reachable under two independent unique keys: the
/// process that registered it and the name it registered under. Both indices
/// are updated together on every mutation.
///
/// The registry starts uninitialized and refuses all endpoint operations
/// until [`initialize`](EndpointRegistry::initialize) fixes the queue
/// parameters. It is not synchronized; share it through
/// [`SharedRegistry`](crate::SharedRegistry).
#[derive(Debug, Default)]
pub struct EndpointRegistry {
    state: Option<RegistryState>,
}

impl EndpointRegistry {
    /// Creates an uninitialized registry
    pub fn new() -> Self {
        Self { state: None }
    }

    /// Creates a registry initialized with `config`
    pub fn with_config(config: RelayConfig) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.initialize(config)?;
        Ok(registry)
    }

    /// Fixes the queue parameters for every endpoint created from now on.
    ///
    /// Both parameters must be positive. Calling this again while already
    /// initialized leaves the existing state and parameters untouched.
    pub fn initialize(&mut self, config: RelayConfig) -> Result<(), RegistryError> {
        config
            .validate()
            .inspect_err(|err| warn!(error = %err, "initialize rejected"))?;

        if self.state.is_some() {
            debug!("registry already initialized");
            return Ok(());
        }

        self.state = Some(RegistryState::new(config)?);
        info!(
            capacity = config.capacity,
            max_payload_len = config.max_payload_len,
            "registry initialized"
        );
        Ok(())
    }

    /// Returns whether the registry has been initialized
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Returns the active configuration
    pub fn config(&self) -> Option<RelayConfig> {
        self.state.as_ref().map(|state| state.config)
    }

    /// Registers `pid` under `name`
    pub fn register(&mut self, pid: ProcessId, name: &str) -> Result<(), RegistryError> {
        self.try_register(pid, name)
            .inspect_err(|err| warn!(%pid, name, error = %err, "register rejected"))
    }

    fn try_register(&mut self, pid: ProcessId, name: &str) -> Result<(), RegistryError> {
        let state = self.state_mut()?;

        if state.endpoints.contains_key(&pid) {
            return Err(RegistryError::DuplicateProcessId(pid));
        }
        if state.names.contains_key(name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        let name = EndpointName::new(name)?;

        let queue = EndpointQueue::new(state.capacity, state.config.max_payload_len);
        state.names.insert(name.clone(), pid);
        state.endpoints.insert(pid, Endpoint::new(pid, name.clone(), queue));
        state.order.push(pid);

        info!(%pid, %name, "endpoint registered");
        Ok(())
    }

    /// Removes the endpoint owned by `pid` and registered as `name`
    ///
    /// Both must match the same endpoint. Queued messages are dropped.
    pub fn unregister(&mut self, pid: ProcessId, name: &str) -> Result<(), RegistryError> {
        self.try_unregister(pid, name)
            .inspect_err(|err| warn!(%pid, name, error = %err, "unregister rejected"))
    }

    fn try_unregister(&mut self, pid: ProcessId, name: &str) -> Result<(), RegistryError> {
        let state = self.state_mut()?;

        let matches = state
            .endpoints
            .get(&pid)
            .is_some_and(|endpoint| endpoint.name().as_str() == name);
        if !matches {
            return Err(RegistryError::NotFound(pid));
        }

        let mut endpoint = state
            .endpoints
            .remove(&pid)
            .ok_or(RegistryError::NotFound(pid))?;
        state.names.remove(name);
        state.order.retain(|registered| *registered != pid);

        let dropped = endpoint.queue.drain();
        info!(%pid, name, dropped, "endpoint unregistered");
        Ok(())
    }

    /// Queues `body` for the endpoint named `to`
    ///
    /// A full destination queue loses its oldest message; that is reported
    /// in the receipt, not as an error.
    pub fn send(
        &mut self,
        from: ProcessId,
        to: &str,
        body: impl Into<String>,
    ) -> Result<SendReceipt, RegistryError> {
        self.try_send(from, to, body.into())
            .inspect_err(|err| warn!(%from, to, error = %err, "send rejected"))
    }

    fn try_send(
        &mut self,
        from: ProcessId,
        to: &str,
        body: String,
    ) -> Result<SendReceipt, RegistryError> {
        let state = self.state_mut()?;

        if !state.endpoints.contains_key(&from) {
            return Err(RegistryError::SenderNotRegistered(from));
        }
        let destination = state
            .names
            .get(to)
            .copied()
            .ok_or_else(|| RegistryError::DestinationNotFound(to.to_string()))?;
        if destination == from {
            return Err(RegistryError::CannotSendToSelf(from));
        }
        let max = state.config.max_payload_len;
        if body.len() >= max {
            return Err(RegistryError::PayloadTooLarge {
                len: body.len(),
                max,
            });
        }

        let endpoint = state
            .endpoints
            .get_mut(&destination)
            .ok_or_else(|| RegistryError::DestinationNotFound(to.to_string()))?;
        let message = Message::new(from, body);
        let message_id = message.id;
        let outcome = endpoint.queue.push(message).map_err(|err| match err {
            QueueError::PayloadTooLarge { len, max } => RegistryError::PayloadTooLarge { len, max },
            QueueError::Empty => unreachable!("push never reports an empty queue"),
        })?;

        if let PushOutcome::Overwrote { evicted } = outcome {
            warn!(
                to,
                %evicted,
                "message queue full, overwrote oldest message"
            );
        }
        info!(%from, to, %message_id, depth = endpoint.queue.len(), "message queued");

        Ok(SendReceipt {
            message_id,
            outcome,
        })
    }

    /// Pops the oldest message queued for `pid`
    ///
    /// An empty queue yields `Ok(None)`; this never blocks.
    pub fn receive(&mut self, pid: ProcessId) -> Result<Option<Message>, RegistryError> {
        let endpoint = self.endpoint_mut(pid)?;
        match endpoint.queue.pop() {
            Ok(message) => {
                debug!(%pid, message_id = %message.id, depth = endpoint.queue.len(), "message received");
                Ok(Some(message))
            }
            Err(QueueError::Empty) => {
                debug!(%pid, "no messages to read");
                Ok(None)
            }
            Err(QueueError::PayloadTooLarge { .. }) => {
                unreachable!("pop does not check the payload bound")
            }
        }
    }

    /// Returns the number of messages queued for `pid`
    pub fn depth(&self, pid: ProcessId) -> Result<usize, RegistryError> {
        Ok(self.endpoint(pid)?.depth())
    }

    /// Returns the body length of the next message for `pid`, if any
    pub fn peek_len(&self, pid: ProcessId) -> Result<Option<usize>, RegistryError> {
        Ok(self.endpoint(pid)?.queue.peek_len())
    }

    /// Releases every endpoint, oldest registration first, and returns the
    /// registry to the uninitialized state.
    ///
    /// Returns how many endpoints were released.
    pub fn teardown_all(&mut self) -> usize {
        let Some(mut state) = self.state.take() else {
            return 0;
        };

        let mut released = 0;
        for pid in state.order.drain(..) {
            if let Some(mut endpoint) = state.endpoints.remove(&pid) {
                let dropped = endpoint.queue.drain();
                debug!(%pid, name = %endpoint.name(), dropped, "endpoint released");
                released += 1;
            }
        }
        state.names.clear();

        info!(endpoints = released, "registry torn down");
        released
    }

    /// Returns the process registered under `name`
    pub fn pid_of(&self, name: &str) -> Option<ProcessId> {
        self.state.as_ref()?.names.get(name).copied()
    }

    /// Returns the name `pid` is registered under
    pub fn name_of(&self, pid: ProcessId) -> Option<&EndpointName> {
        self.state
            .as_ref()?
            .endpoints
            .get(&pid)
            .map(Endpoint::name)
    }

    /// Returns a snapshot of every endpoint in registration order
    pub fn endpoints(&self) -> Vec<EndpointInfo> {
        let Some(state) = self.state.as_ref() else {
            return Vec::new();
        };
        state
            .order
            .iter()
            .filter_map(|pid| state.endpoints.get(pid))
            .map(Endpoint::info)
            .collect()
    }

    /// Returns the number of registered endpoints
    pub fn count(&self) -> usize {
        self.state
            .as_ref()
            .map_or(0, |state| state.endpoints.len())
    }

    fn state_mut(&mut self) -> Result<&mut RegistryState, RegistryError> {
        self.state.as_mut().ok_or(RegistryError::NotInitialized)
    }

    fn endpoint(&self, pid: ProcessId) -> Result<&Endpoint, RegistryError> {
        self.state
            .as_ref()
            .ok_or(RegistryError::NotInitialized)?
            .endpoints
            .get(&pid)
            .ok_or(RegistryError::NotFound(pid))
    }

    fn endpoint_mut(&mut self, pid: ProcessId) -> Result<&mut Endpoint, RegistryError> {
        self.state_mut()?
            .endpoints
            .get_mut(&pid)
            .ok_or(RegistryError::NotFound(pid))
    }
}
