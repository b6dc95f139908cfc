//! Bounded endpoint mailbox.
//!
//! A fixed-capacity ring of owned messages with FIFO delivery. When the ring
//! is full the oldest message is dropped to make room for the newest.

use crate::message::{Message, MessageId};
use std::num::NonZeroUsize;
use thiserror::Error;

/// Queue error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Message body is not shorter than the payload bound
    #[error("Payload of {len} bytes exceeds limit (must be shorter than {max})")]
    PayloadTooLarge { len: usize, max: usize },

    /// Nothing to pop
    #[error("Queue is empty")]
    Empty,
}

/// Result of a successful push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// Stored without displacing anything
    Stored,
    /// Queue was full; the oldest message was dropped first
    Overwrote { evicted: MessageId },
}

impl PushOutcome {
    /// Returns whether an older message was dropped
    pub fn evicted(&self) -> bool {
        matches!(self, PushOutcome::Overwrote { .. })
    }
}

/// Ring buffer of messages for one endpoint.
#[derive(Debug)]
pub struct EndpointQueue {
    slots: Vec<Option<Message>>,
    head: usize,
    tail: usize,
    count: usize,
    max_payload_len: usize,
}

impl EndpointQueue {
    /// Creates an empty queue.
    ///
    /// Bodies of `max_payload_len` bytes or more are refused by [`push`].
    ///
    /// [`push`]: EndpointQueue::push
    pub fn new(capacity: NonZeroUsize, max_payload_len: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.get());
        slots.resize_with(capacity.get(), || None);
        Self {
            slots,
            head: 0,
            tail: 0,
            count: 0,
            max_payload_len,
        }
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of queued messages.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns whether the next push will overwrite.
    pub fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    /// Checks a body length against the payload bound.
    pub fn check_len(&self, len: usize) -> Result<(), QueueError> {
        if len >= self.max_payload_len {
            return Err(QueueError::PayloadTooLarge {
                len,
                max: self.max_payload_len,
            });
        }
        Ok(())
    }

    /// Pushes a message at the tail, dropping the oldest if full.
    pub fn push(&mut self, message: Message) -> Result<PushOutcome, QueueError> {
        self.check_len(message.len())?;

        let mut outcome = PushOutcome::Stored;
        if self.is_full() {
            if let Some(oldest) = self.slots[self.head].take() {
                outcome = PushOutcome::Overwrote { evicted: oldest.id };
            }
            self.head = self.advance(self.head);
            self.count -= 1;
        }

        self.slots[self.tail] = Some(message);
        self.tail = self.advance(self.tail);
        self.count += 1;
        Ok(outcome)
    }

    /// Pops the oldest message.
    pub fn pop(&mut self) -> Result<Message, QueueError> {
        if self.count == 0 {
            return Err(QueueError::Empty);
        }
        let message = self.slots[self.head].take().ok_or(QueueError::Empty)?;
        self.head = self.advance(self.head);
        self.count -= 1;
        Ok(message)
    }

    /// Returns the body length of the oldest message without removing it.
    pub fn peek_len(&self) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        self.slots[self.head].as_ref().map(Message::len)
    }

    /// Drops every queued message and rewinds the cursors.
    ///
    /// Returns how many messages were released.
    pub fn drain(&mut self) -> usize {
        let released = self.count;
        for slot in &mut self.slots {
            *slot = None;
        }
        self.head = 0;
        self.tail = 0;
        self.count = 0;
        released
    }

    fn advance(&self, cursor: usize) -> usize {
        (cursor + 1) % self.slots.len()
    }
}
