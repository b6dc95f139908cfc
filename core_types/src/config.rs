//! Relay configuration
//!
//! The two parameters every endpoint queue is built from. They are fixed once
//! a registry is initialized and never change for its lifetime.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Queue capacity must be positive
    #[error("Queue capacity must be a positive integer, got {0}")]
    InvalidCapacity(usize),

    /// Payload bound must be positive
    #[error("Maximum payload length must be a positive integer, got {0}")]
    InvalidMaxPayloadLength(usize),

    /// Configuration text could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Configuration file could not be read
    #[error("Failed to read configuration file: {0}")]
    Io(String),
}

/// Per-endpoint queue parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Number of messages each endpoint queue holds before overwriting
    pub capacity: usize,
    /// Exclusive upper bound on a message body length, in bytes
    pub max_payload_len: usize,
}

impl RelayConfig {
    /// Creates a configuration
    pub const fn new(capacity: usize, max_payload_len: usize) -> Self {
        Self {
            capacity,
            max_payload_len,
        }
    }

    /// Checks that both parameters are strictly positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::InvalidCapacity(self.capacity));
        }
        if self.max_payload_len == 0 {
            return Err(ConfigError::InvalidMaxPayloadLength(self.max_payload_len));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: RelayConfig =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json_str(&text)
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self::new(5, 250)
    }
}
