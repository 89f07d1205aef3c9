use thiserror::Error;

use spatial_storage_shared::{DeviceError, PersistError, StorageError};

use crate::{SessionKey, TerminalError};

/// Errors returned by [`StorageServer`](crate::StorageServer) operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageServerError {
    /// No storage network is registered at the position
    #[error("No storage controller is registered at {pos}")]
    ControllerNotFound { pos: String },

    /// A storage network is already registered at the position
    #[error("A storage controller is already registered at {pos}")]
    ControllerExists { pos: String },

    /// The world has no controller block entity at the position
    #[error("Block at {pos} is not a storage controller")]
    NotAController { pos: String },

    /// The world has no wormhole block entity at the position
    #[error("Block at {pos} is not a stable wormhole")]
    NotATerminal { pos: String },

    /// The position is in a chunk that is not loaded
    #[error("Chunk containing {pos} is not loaded")]
    ChunkNotLoaded { pos: String },

    /// No remote terminal is registered at the position
    #[error("No stable wormhole is registered at {pos}")]
    TerminalNotFound { pos: String },

    /// A remote terminal is already registered at the position
    #[error("A stable wormhole is already registered at {pos}")]
    TerminalExists { pos: String },

    /// The stabilizer is already attached to a controller
    #[error("Stabilizer at {pos} is already attached to a controller")]
    StabilizerAttached { pos: String },

    /// The stabilizer is not attached to any controller
    #[error("Stabilizer at {pos} is not attached to a controller")]
    StabilizerNotAttached { pos: String },

    /// The session was closed or never existed
    #[error("Session {key:?} is not open")]
    SessionNotFound { key: SessionKey },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] TerminalError),

    #[error("Persist error: {0}")]
    Persist(#[from] PersistError),
}
