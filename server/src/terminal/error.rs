use thiserror::Error;

/// Errors that can occur while resolving or editing a remote terminal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TerminalError {
    /// The terminal has no controller link
    #[error("Stable wormhole at {terminal} is not linked to a storage controller")]
    NotLinked { terminal: String },

    /// The linked controller no longer has a network
    #[error("Stable wormhole links to {controller}, which has no storage network")]
    ControllerMissing { controller: String },

    /// The linked controller's chunk is not loaded
    #[error("Storage controller at {controller} is in an unloaded chunk")]
    ChunkNotLoaded { controller: String },

    /// Crafting matrix slot index out of bounds
    #[error("Crafting matrix slot {slot} is out of range (0..{slots})")]
    InvalidSlot { slot: usize, slots: usize },
}
