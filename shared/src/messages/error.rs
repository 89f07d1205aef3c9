use thiserror::Error;

use spatial_storage_serde::SerdeErr;

/// Errors that can occur while decoding a storage message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// Payload could not be decoded
    #[error("Storage message payload is malformed: {0}")]
    Decode(#[from] SerdeErr),

    /// Message kind byte is not known to this version
    #[error("Unknown storage message kind {kind}. The sender may be running a newer protocol")]
    UnknownKind { kind: u8 },
}
