mod container;
mod container_session;

pub use container::{ContainerKind, ContainerTarget};
pub use container_session::{CloseReason, ContainerSession, OpenFailure, SessionKey};
