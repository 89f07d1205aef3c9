use spatial_storage_shared::GlobalPos;

/// The UI a session was opened through
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContainerKind {
    /// Direct UI at the controller block
    StorageController,
    /// Remote terminal block linked to a controller
    StableWormhole,
    /// Hand-held remote linked to a controller
    StorageRemote,
}

impl ContainerKind {
    pub const ALL: [ContainerKind; 3] = [
        ContainerKind::StorageController,
        ContainerKind::StableWormhole,
        ContainerKind::StorageRemote,
    ];

    /// Whether the player must stay within interaction range of the block
    pub fn is_distance_gated(self) -> bool {
        !matches!(self, ContainerKind::StorageRemote)
    }
}

/// What the player interacted with to open a session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerTarget {
    /// The controller block itself
    Controller(GlobalPos),
    /// A stable wormhole block
    Wormhole(GlobalPos),
    /// A storage remote item, holding the position of its controller
    Remote(GlobalPos),
}

impl ContainerTarget {
    pub fn kind(&self) -> ContainerKind {
        match self {
            ContainerTarget::Controller(_) => ContainerKind::StorageController,
            ContainerTarget::Wormhole(_) => ContainerKind::StableWormhole,
            ContainerTarget::Remote(_) => ContainerKind::StorageRemote,
        }
    }

    /// The block the player interacted with. For a remote this is the
    /// controller it points at.
    pub fn block(&self) -> GlobalPos {
        match self {
            ContainerTarget::Controller(pos)
            | ContainerTarget::Wormhole(pos)
            | ContainerTarget::Remote(pos) => *pos,
        }
    }
}
