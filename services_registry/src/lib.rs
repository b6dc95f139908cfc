//! # Endpoint Registry
//!
//! This crate implements name-addressed message routing between processes.
//!
//! ## Philosophy
//!
//! A process registers under a name of its choosing, then any other
//! registered process can send it short text messages by that name. Each
//! endpoint owns a bounded mailbox; a full mailbox drops its oldest message
//! rather than refusing the newest.
//!
//! ## Structure
//!
//! - [`EndpointRegistry`]: the single-owner registry with dual unique keys
//!   (process ID and name)
//! - [`SharedRegistry`]: a cloneable, lock-guarded handle for concurrent callers

pub mod endpoint;
pub mod error;
pub mod registry;
pub mod shared;

pub use endpoint::{Endpoint, EndpointInfo};
pub use error::RegistryError;
pub use registry::{EndpointRegistry, SendReceipt};
pub use shared::SharedRegistry;
