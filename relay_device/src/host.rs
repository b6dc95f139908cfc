//! # Relay Host
//!
//! Drives a [`RelayDevice`] from a script and renders one line of output per
//! step, the way the interactive test client reports each call.

use crate::device::RelayDevice;
use crate::error::DeviceError;
use crate::script::{DeviceScript, ScriptAction, ScriptStep};
use core_types::{ConfigError, RelayConfig};
use std::path::Path;
use tracing::debug;

/// Read buffer size used by the host, matching the test client's buffer
pub const DEFAULT_READ_BUFFER: usize = 256;

/// Host configuration sources, highest precedence first: explicit values,
/// then the config file, then defaults.
#[derive(Debug, Clone, Default)]
pub struct HostConfigSources<'a> {
    pub config_file: Option<&'a Path>,
    pub capacity: Option<usize>,
    pub max_payload_len: Option<usize>,
}

impl HostConfigSources<'_> {
    /// Merges the sources into a validated configuration
    pub fn resolve(&self) -> Result<RelayConfig, ConfigError> {
        let mut config = match self.config_file {
            Some(path) => RelayConfig::from_json_file(path)?,
            None => RelayConfig::default(),
        };
        if let Some(capacity) = self.capacity {
            config.capacity = capacity;
        }
        if let Some(max_payload_len) = self.max_payload_len {
            config.max_payload_len = max_payload_len;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Script runner over a device
pub struct RelayHost {
    device: RelayDevice,
    read_buffer: Vec<u8>,
}

impl RelayHost {
    /// Creates a host over `device`
    pub fn new(device: RelayDevice) -> Self {
        Self::with_read_buffer(device, DEFAULT_READ_BUFFER)
    }

    /// Creates a host that reads through a buffer of `len` bytes
    pub fn with_read_buffer(device: RelayDevice, len: usize) -> Self {
        Self {
            device,
            read_buffer: vec![0; len],
        }
    }

    /// Returns the device
    pub fn device(&self) -> &RelayDevice {
        &self.device
    }

    /// Runs every step and returns the rendered output lines
    pub fn run(&mut self, script: &DeviceScript) -> Vec<String> {
        script.steps().iter().map(|step| self.step(step)).collect()
    }

    /// Runs a single step
    pub fn step(&mut self, step: &ScriptStep) -> String {
        debug!(line = step.line, pid = %step.pid, "running script step");
        match &step.action {
            ScriptAction::Write(text) => match self.device.write(step.pid, text.as_bytes()) {
                Ok(_) => format!("{}: ok", step.pid),
                Err(err) => format!("{}: write failed: {}", step.pid, err),
            },
            ScriptAction::Read => match self.device.read(step.pid, &mut self.read_buffer) {
                Ok(0) => format!("{}: no messages to read", step.pid),
                Ok(len) => format!(
                    "{}: received: {}",
                    step.pid,
                    String::from_utf8_lossy(&self.read_buffer[..len - 1])
                ),
                Err(err) => format!("{}: read failed: {}", step.pid, err),
            },
        }
    }

    /// Unloads the device
    pub fn shutdown(&self) -> Result<usize, DeviceError> {
        self.device.shutdown()
    }
}
