//! # Spatial Storage Server
//! Owns every storage network in a world, mediates the container sessions
//! players open on them, and periodically pushes each open session the
//! state of its network.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use spatial_storage_shared::{
        BitReader, BitWrite, BitWriter, ConstBitLength, Serde, SerdeErr,
        SignedVariableInteger, UnsignedVariableInteger,
    };
}

mod commands;
mod error;
mod events;
mod server;
mod session;
mod terminal;
mod transport;

pub use commands::{CommandRejection, StorageCommand};
pub use error::StorageServerError;
pub use events::{
    CommandRejectedEvent, DeliverEvent, Event, Events, SessionClosedEvent, SessionOpenedEvent,
};
pub use server::{ServerConfig, StorageServer};
pub use session::{
    CloseReason, ContainerKind, ContainerSession, ContainerTarget, OpenFailure, SessionKey,
};
pub use terminal::{RemoteTerminal, TerminalError, TerminalState, MATRIX_SLOTS};
pub use transport::{PacketSender, TransportError};
