//! Identifiers for relay endpoints

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use thiserror::Error;

/// Identifier of a calling process
///
/// Supplied by the caller's environment and trusted as-is. The relay only
/// ever compares process identifiers; it never interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProcessId(u32);

impl ProcessId {
    /// Creates a process ID from a raw value
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value
    pub const fn as_raw(&self) -> u32 {
        self.0
    }
}

impl From<u32> for ProcessId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pid:{}", self.0)
    }
}

/// Rejected endpoint name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Endpoint name must not be empty")]
pub struct InvalidName;

/// Display name an endpoint is registered under
///
/// Names are compared exactly (case-sensitive) and are never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EndpointName(String);

impl EndpointName {
    /// Creates a name, rejecting the empty string
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidName> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidName);
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EndpointName {
    type Error = InvalidName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EndpointName> for String {
    fn from(name: EndpointName) -> Self {
        name.0
    }
}

impl Borrow<str> for EndpointName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EndpointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_id_round_trip() {
        let pid = ProcessId::from_raw(4242);
        assert_eq!(pid.as_raw(), 4242);
        assert_eq!(ProcessId::from(4242), pid);
    }

    #[test]
    fn test_process_id_display() {
        let display = format!("{}", ProcessId::from_raw(7));
        assert_eq!(display, "pid:7");
    }

    #[test]
    fn test_endpoint_name_rejects_empty() {
        assert_eq!(EndpointName::new(""), Err(InvalidName));
    }

    #[test]
    fn test_endpoint_name_is_case_sensitive() {
        let lower = EndpointName::new("alice").unwrap();
        let upper = EndpointName::new("Alice").unwrap();
        assert_ne!(lower, upper);
        assert_eq!(lower.as_str(), "alice");
    }

    #[test]
    fn test_endpoint_name_deserialize_rejects_empty() {
        let result: Result<EndpointName, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());

        let name: EndpointName = serde_json::from_str("\"bob\"").unwrap();
        assert_eq!(name.as_str(), "bob");
    }
}
