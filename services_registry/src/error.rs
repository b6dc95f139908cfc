//! Registry error types

use core_types::{ConfigError, InvalidName, ProcessId};
use thiserror::Error;

/// Errors that can occur when operating on the endpoint registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Registry has not been initialized
    #[error("Registry not initialized")]
    NotInitialized,

    /// Capacity or payload bound is not positive
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// Endpoint name is empty
    #[error("Invalid endpoint name: {0}")]
    InvalidName(#[from] InvalidName),

    /// Process already owns an endpoint
    #[error("Process already registered: {0}")]
    DuplicateProcessId(ProcessId),

    /// Name already taken by another endpoint
    #[error("Endpoint name already registered: {0}")]
    DuplicateName(String),

    /// No endpoint matches the process (and name, where given)
    #[error("Endpoint not found for {0}")]
    NotFound(ProcessId),

    /// Sending process has no endpoint
    #[error("Process must be registered to send messages: {0}")]
    SenderNotRegistered(ProcessId),

    /// No endpoint with the destination name
    #[error("Destination endpoint not found: {0}")]
    DestinationNotFound(String),

    /// Destination resolves to the sender itself
    #[error("Cannot send a message to self: {0}")]
    CannotSendToSelf(ProcessId),

    /// Message body is not shorter than the payload bound
    #[error("Payload of {len} bytes exceeds limit (must be shorter than {max})")]
    PayloadTooLarge { len: usize, max: usize },

    /// A thread panicked while holding the registry lock
    #[error("Registry lock poisoned")]
    Poisoned,
}
