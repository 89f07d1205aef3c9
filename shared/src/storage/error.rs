use thiserror::Error;

use spatial_storage_serde::SerdeErr;

use crate::CapacityTier;

/// Errors that can occur while changing a storage network's layout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Attempted to remove a stabilizer that is not attached
    #[error("No {tier:?} stabilizer is installed on the controller at {controller}")]
    ModuleNotInstalled { controller: String, tier: CapacityTier },
}

/// Errors that can occur while restoring a storage network from save data.
/// These indicate corrupted save data and are not recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistError {
    /// Save data could not be decoded
    #[error("Storage save data is malformed: {0}")]
    Decode(#[from] SerdeErr),

    /// Save data was written by an unknown format version
    #[error("Storage save format version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u8, expected: u8 },

    /// A stored stack had a quantity of zero
    #[error("Save data contains an empty stack of {kind}")]
    EmptyStack { kind: String },

    /// The same item kind appeared twice in the contents
    #[error("Save data contains {kind} more than once")]
    DuplicateKind { kind: String },

    /// The same device appeared twice in the directory
    #[error("Save data binds device {device} more than once")]
    DuplicateDevice { device: String },

    /// The item counts would overflow
    #[error("Save data item counts overflow")]
    CountOverflow,
}
