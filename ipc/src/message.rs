//! Message types

use core_types::ProcessId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Creates a new random message ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Msg({})", self.0)
    }
}

/// A text message addressed to one endpoint
///
/// The body is the payload proper; its length in bytes is what the payload
/// bound applies to. The sender is recorded so a reader can tell who wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for this message
    pub id: MessageId,
    /// Process that sent the message
    pub sender: ProcessId,
    /// Message text
    pub body: String,
}

impl Message {
    /// Creates a message with a fresh ID
    pub fn new(sender: ProcessId, body: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            sender,
            body: body.into(),
        }
    }

    /// Returns the body length in bytes
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns whether the body is empty
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the body as a string slice
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consumes the message, returning its body
    pub fn into_body(self) -> String {
        self.body
    }
}
