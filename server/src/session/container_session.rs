use thiserror::Error;

use spatial_storage_shared::{GameTick, GlobalPos, PlayerId, SyncIndex};

use super::{ContainerKind, ContainerTarget};

// SessionKey
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionKey(u64);

impl SessionKey {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

/// Reasons an open request is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OpenFailure {
    /// The player is not within interaction range of the block
    #[error("Player is too far away from the storage block")]
    TooFar,

    /// Another player already has this container kind open on the network
    #[error("This storage container is already open")]
    AlreadyOpen,

    /// The controller is missing, unloaded, destroyed or unlinked
    #[error("The storage controller is not available")]
    ControllerInvalid,
}

/// Why a session ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    /// The player closed the UI
    Requested,
    /// The controller or the wormhole was removed or destroyed
    ContainerRemoved,
    /// The controller's chunk unloaded or the wormhole lost its link
    NetworkUnreachable,
    /// The player walked out of interaction range
    OutOfRange,
    /// The player is no longer online
    PlayerGone,
}

/// One player's open view of a storage network
#[derive(Clone, Debug)]
pub struct ContainerSession {
    player: PlayerId,
    target: ContainerTarget,
    controller: GlobalPos,
    opened_at: GameTick,
    last_sync_index: SyncIndex,
    last_synced_revision: Option<u64>,
}

impl ContainerSession {
    pub(crate) fn new(
        player: PlayerId,
        target: ContainerTarget,
        controller: GlobalPos,
        opened_at: GameTick,
    ) -> Self {
        Self {
            player,
            target,
            controller,
            opened_at,
            last_sync_index: 0,
            last_synced_revision: None,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn target(&self) -> ContainerTarget {
        self.target
    }

    pub fn kind(&self) -> ContainerKind {
        self.target.kind()
    }

    pub fn controller(&self) -> GlobalPos {
        self.controller
    }

    pub fn opened_at(&self) -> GameTick {
        self.opened_at
    }

    /// Sync index of the last push that was at least partly handed to the
    /// transport
    pub fn last_sync_index(&self) -> SyncIndex {
        self.last_sync_index
    }

    pub fn has_synced(&self) -> bool {
        self.last_synced_revision.is_some()
    }

    /// Whether a push is due for a network currently at `revision`
    pub(crate) fn needs_push(&self, revision: u64) -> bool {
        self.last_synced_revision != Some(revision)
    }

    pub(crate) fn next_sync_index(&self) -> SyncIndex {
        self.last_sync_index.wrapping_add(1)
    }

    /// Marks `sync_index` as used once any payload stamped with it reached
    /// the transport. A retry of the same push takes the next index.
    pub(crate) fn record_sent(&mut self, sync_index: SyncIndex) {
        self.last_sync_index = sync_index;
    }

    pub(crate) fn record_push(&mut self, sync_index: SyncIndex, revision: u64) {
        self.record_sent(sync_index);
        self.last_synced_revision = Some(revision);
    }
}
