use thiserror::Error;

use spatial_storage_shared::PlayerId;

/// Errors that can occur while handing a payload to the transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The player has no open connection
    #[error("Player {player:?} is not connected")]
    NotConnected { player: PlayerId },

    /// The transport refused the payload
    #[error("Transport rejected a payload of {length} bytes: {reason}")]
    Rejected { length: usize, reason: String },
}

/// Used to send storage pushes to connected players
pub trait PacketSender: Send + Sync {
    /// Sends a payload to a player. Delivery is not confirmed.
    fn send(&self, player: &PlayerId, payload: &[u8]) -> Result<(), TransportError>;
}
