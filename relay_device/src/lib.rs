//! # Relay Device Front
//!
//! This crate provides the surface a message-relay character device exposes
//! to processes, layered over the endpoint registry.
//!
//! ## Responsibilities
//!
//! - Parses the write-command grammar (`/reg`, `/unreg`, `/<name> <message>`)
//! - Dispatches commands to the registry on behalf of the calling process
//! - Serves reads one message at a time, NUL-terminated
//! - Runs scripted multi-process sessions for the `mq_relayd` host
//!
//! ## Non-Responsibilities
//!
//! The front does NOT:
//! - Authenticate callers (process IDs are trusted as given)
//! - Block readers waiting for messages
//! - Persist anything across unloads

pub mod commands;
pub mod device;
pub mod error;
pub mod host;
pub mod script;

pub use commands::{RelayCommand, RelayCommandParser};
pub use device::RelayDevice;
pub use error::DeviceError;
pub use host::{HostConfigSources, RelayHost, DEFAULT_READ_BUFFER};
pub use script::{DeviceScript, ScriptAction, ScriptError, ScriptStep};
