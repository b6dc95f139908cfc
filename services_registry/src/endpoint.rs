//! Registered endpoints

use core_types::{EndpointName, ProcessId};
use ipc::EndpointQueue;

/// A registered process and the mailbox it owns
#[derive(Debug)]
pub struct Endpoint {
    pid: ProcessId,
    name: EndpointName,
    pub(crate) queue: EndpointQueue,
}

impl Endpoint {
    pub(crate) fn new(pid: ProcessId, name: EndpointName, queue: EndpointQueue) -> Self {
        Self { pid, name, queue }
    }

    /// Returns the owning process
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    /// Returns the registered name
    pub fn name(&self) -> &EndpointName {
        &self.name
    }

    /// Returns the number of queued messages
    pub fn depth(&self) -> usize {
        self.queue.len()
    }

    /// Returns a point-in-time summary
    pub fn info(&self) -> EndpointInfo {
        EndpointInfo {
            pid: self.pid,
            name: self.name.clone(),
            depth: self.queue.len(),
        }
    }
}

/// Snapshot of an endpoint for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointInfo {
    pub pid: ProcessId,
    pub name: EndpointName,
    pub depth: usize,
}
