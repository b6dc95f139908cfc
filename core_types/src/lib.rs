//! # Core Types
//!
//! This crate defines the fundamental types shared by the message relay.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Process identifiers and endpoint names are
//!   distinct types and cannot be confused.
//! - **Validated at the edge**: An `EndpointName` or `RelayConfig` that exists
//!   is already known to be well formed.
//!
//! ## Key Types
//!
//! - [`ProcessId`]: Caller-supplied identifier of a process
//! - [`EndpointName`]: Non-empty display name an endpoint registers under
//! - [`RelayConfig`]: Queue capacity and payload bound shared by all endpoints

pub mod config;
pub mod ids;

pub use config::{ConfigError, RelayConfig};
pub use ids::{EndpointName, InvalidName, ProcessId};
