//! # Inter-Process Communication (IPC)
//!
//! This crate defines the relay's message type and the bounded mailbox each
//! endpoint owns.
//!
//! ## Philosophy
//!
//! - **Owned payloads**: A queued message belongs to the queue until it is
//!   popped (moved to the reader) or evicted (dropped)
//! - **Bounded, never blocking**: Every queue has a fixed capacity; a full
//!   queue drops its oldest message instead of refusing the newest
//! - **Traceable**: Every message carries an ID for log correlation

pub mod message;
pub mod queue;

pub use message::{Message, MessageId};
pub use queue::{EndpointQueue, PushOutcome, QueueError};
