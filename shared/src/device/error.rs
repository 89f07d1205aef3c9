use thiserror::Error;

/// Errors that can occur while changing linked devices
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// Attempted to configure a device that was never bound, or was unbound
    #[error("Device at {device} is not bound to this storage network")]
    NotBound { device: String },
}
