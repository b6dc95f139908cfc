//! Device error types

use services_registry::RegistryError;
use thiserror::Error;

/// Errors surfaced to device callers
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeviceError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("Command is not valid UTF-8")]
    InvalidUtf8,

    #[error("Buffer too small: message needs {needed} bytes, buffer holds {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
