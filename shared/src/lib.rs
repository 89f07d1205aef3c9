//! # Spatial Storage Shared
//! Storage networks, capacity accounting, linked devices and the sync
//! messages shared between spatial-storage-server & spatial-storage-client.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use spatial_storage_serde::{
    BitReader, BitWrite, BitWriter, ConstBitLength, Serde, SerdeErr, SerdeIntegerConversion,
    SignedVariableInteger, UnsignedVariableInteger,
};

mod config;
mod device;
mod item;
mod messages;
mod sequence;
mod storage;
mod types;
mod world;

pub use config::{CapacityTier, StorageConfig, TierBonus};
pub use device::{
    device_link::{DeviceBinding, DeviceHandle, DeviceLink, DeviceUpdate},
    error::DeviceError,
    linked_device_directory::LinkedDeviceDirectory,
};
pub use item::{
    catalog::{ItemCatalog, MapItemCatalog},
    item_filter::{FilterMode, ItemFilter, ItemFilterRule},
    item_kind::{ItemData, ItemId, ItemKind},
    stored_stack::StoredStack,
};
pub use messages::{
    error::MessageError,
    storage_message::{
        CapacitySnapshot, LinkedMachinesUpdateMessage, StackUpdateMessage, StorageMessage,
    },
};
pub use sequence::{sequence_greater_than, sequence_less_than, wrapping_diff};
pub use storage::{
    capacity_ledger::CapacityLedger,
    error::{PersistError, StorageError},
    query::{QueryToken, SortDirection, SortKey, StackQuery},
    storage_network::StorageNetwork,
};
pub use types::{BlockPos, DimensionId, Direction, GameTick, GlobalPos, PlayerId, SyncIndex, Vec3};
pub use world::{
    block::{BlockEntityHandle, BlockEntityKind, BlockProperty, ACTIVE_PROPERTY, LINKED_PROPERTY},
    world_type::{WorldMutType, WorldRefType},
};
