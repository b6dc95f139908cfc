//! # Relay Device
//!
//! The read/write surface a character device exposes over the registry.
//! Writes carry one command each; reads pop one message for the caller.

use crate::commands::{RelayCommand, RelayCommandParser};
use crate::error::DeviceError;
use core_types::{ProcessId, RelayConfig};
use ipc::Message;
use services_registry::SharedRegistry;
use tracing::{debug, info, warn};

/// Device front over a shared registry
#[derive(Debug, Clone)]
pub struct RelayDevice {
    registry: SharedRegistry,
}

impl RelayDevice {
    /// Creates a device over an existing registry handle
    pub fn new(registry: SharedRegistry) -> Self {
        Self { registry }
    }

    /// Creates a device with a fresh registry initialized from `config`
    pub fn load(config: RelayConfig) -> Result<Self, DeviceError> {
        let registry = SharedRegistry::new();
        registry.initialize(config)?;
        info!(
            capacity = config.capacity,
            max_payload_len = config.max_payload_len,
            "relay device loaded"
        );
        Ok(Self::new(registry))
    }

    /// Returns the registry handle
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    /// Handles one write from `pid`
    ///
    /// Returns the number of bytes consumed.
    pub fn write(&self, pid: ProcessId, bytes: &[u8]) -> Result<usize, DeviceError> {
        let text = std::str::from_utf8(bytes).map_err(|_| DeviceError::InvalidUtf8)?;
        let command = RelayCommandParser::parse(text)
            .inspect_err(|err| warn!(%pid, error = %err, "invalid command format"))?;
        self.execute(pid, command)?;
        Ok(bytes.len())
    }

    /// Executes an already parsed command on behalf of `pid`
    pub fn execute(&self, pid: ProcessId, command: RelayCommand) -> Result<(), DeviceError> {
        match command {
            RelayCommand::Register { name } => self.registry.register(pid, &name)?,
            RelayCommand::Unregister { name } => self.registry.unregister(pid, &name)?,
            RelayCommand::Send { to, body } => {
                self.registry.send(pid, &to, body)?;
            }
        }
        Ok(())
    }

    /// Handles one read from `pid`
    ///
    /// Copies the oldest queued message into `buffer` followed by a NUL byte
    /// and returns the number of bytes written. Returns `Ok(0)` when nothing
    /// is queued. A message that does not fit stays queued.
    pub fn read(&self, pid: ProcessId, buffer: &mut [u8]) -> Result<usize, DeviceError> {
        self.registry.with(|registry| -> Result<usize, DeviceError> {
            let Some(len) = registry.peek_len(pid)? else {
                debug!(%pid, "no messages to read");
                return Ok(0);
            };
            let needed = len + 1;
            if needed > buffer.len() {
                return Err(DeviceError::BufferTooSmall {
                    needed,
                    available: buffer.len(),
                });
            }

            let Some(message) = registry.receive(pid)? else {
                return Ok(0);
            };
            buffer[..len].copy_from_slice(message.body.as_bytes());
            buffer[len] = 0;
            debug!(%pid, bytes = needed, "copied message to reader");
            Ok(needed)
        })?
    }

    /// Pops the oldest message for `pid` without copying it anywhere
    pub fn read_message(&self, pid: ProcessId) -> Result<Option<Message>, DeviceError> {
        Ok(self.registry.receive(pid)?)
    }

    /// Releases every endpoint; the device must be loaded again before use
    pub fn shutdown(&self) -> Result<usize, DeviceError> {
        let released = self.registry.teardown_all()?;
        info!(endpoints = released, "relay device unloaded");
        Ok(released)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services_registry::RegistryError;

    fn pid(raw: u32) -> ProcessId {
        ProcessId::from_raw(raw)
    }

    fn device() -> RelayDevice {
        RelayDevice::load(RelayConfig::new(2, 10)).unwrap()
    }

    #[test]
    fn test_load_rejects_zero_parameters() {
        assert!(matches!(
            RelayDevice::load(RelayConfig::new(0, 10)),
            Err(DeviceError::Registry(RegistryError::InvalidConfiguration(_)))
        ));
    }

    #[test]
    fn test_write_returns_consumed_length() {
        let device = device();
        assert_eq!(device.write(pid(1), b"/reg alice").unwrap(), 10);
    }

    #[test]
    fn test_write_then_read() {
        let device = device();
        device.write(pid(1), b"/reg alice").unwrap();
        device.write(pid(2), b"/reg bob").unwrap();
        device.write(pid(2), b"/alice hi").unwrap();

        let mut buffer = [0xffu8; 16];
        assert_eq!(device.read(pid(1), &mut buffer).unwrap(), 3);
        assert_eq!(&buffer[..3], b"hi\0");
        assert_eq!(device.read(pid(1), &mut buffer).unwrap(), 0);
    }

    #[test]
    fn test_read_into_small_buffer_keeps_message() {
        let device = device();
        device.write(pid(1), b"/reg a").unwrap();
        device.write(pid(2), b"/reg b").unwrap();
        device.write(pid(2), b"/a hello").unwrap();

        let mut small = [0u8; 5];
        assert_eq!(
            device.read(pid(1), &mut small),
            Err(DeviceError::BufferTooSmall {
                needed: 6,
                available: 5
            })
        );

        let mut buffer = [0u8; 6];
        assert_eq!(device.read(pid(1), &mut buffer).unwrap(), 6);
        assert_eq!(&buffer, b"hello\0");
    }

    #[test]
    fn test_registry_errors_surface() {
        let device = device();
        assert_eq!(
            device.write(pid(1), b"/bob hi"),
            Err(DeviceError::Registry(RegistryError::SenderNotRegistered(
                pid(1)
            )))
        );
        let mut buffer = [0u8; 8];
        assert_eq!(
            device.read(pid(1), &mut buffer),
            Err(DeviceError::Registry(RegistryError::NotFound(pid(1))))
        );
    }

    #[test]
    fn test_invalid_utf8() {
        let device = device();
        assert_eq!(
            device.write(pid(1), &[b'/', 0xff, 0xfe]),
            Err(DeviceError::InvalidUtf8)
        );
    }

    #[test]
    fn test_shutdown() {
        let device = device();
        device.write(pid(1), b"/reg a").unwrap();
        assert_eq!(device.shutdown().unwrap(), 1);
        assert_eq!(
            device.write(pid(1), b"/reg a"),
            Err(DeviceError::Registry(RegistryError::NotInitialized))
        );
    }
}
