use crate::{CapacityTier, GlobalPos};

/// Block property written on a controller while it has a live network
pub const ACTIVE_PROPERTY: &str = "active";
/// Block property written on a wormhole while it is linked to a controller
pub const LINKED_PROPERTY: &str = "linked";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockProperty {
    Bool(bool),
    Int(i32),
    Text(String),
}

impl BlockProperty {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            BlockProperty::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockEntityKind {
    StorageController,
    StorageStabilizer(CapacityTier),
    StableWormhole,
    /// Any other machine, bindable as a linked device
    Machine,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockEntityHandle {
    pub pos: GlobalPos,
    pub kind: BlockEntityKind,
}

impl BlockEntityHandle {
    pub fn new(pos: GlobalPos, kind: BlockEntityKind) -> Self {
        Self { pos, kind }
    }
}
