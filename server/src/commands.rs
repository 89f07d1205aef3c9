use spatial_storage_shared::{DeviceHandle, DeviceUpdate, ItemKind, StoredStack};

/// A player action against the network behind an open session. Commands
/// are queued and applied at the start of the next tick, in queue order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageCommand {
    /// Store a stack carried by the player. Whatever does not fit is
    /// handed back.
    Insert { stack: StoredStack },
    /// Take up to `amount` of a kind
    Extract { kind: ItemKind, amount: u64 },
    /// Take every ingredient of a recipe, or nothing, and hand `output` over.
    ///
    /// The server does not know recipes and does not read the wormhole's
    /// crafting matrix here. The host game must match `ingredients` and
    /// `output` against a recipe before calling
    /// [`StorageServer::queue_command`](crate::StorageServer::queue_command).
    Craft {
        ingredients: Vec<StoredStack>,
        output: StoredStack,
    },
    /// Replace one slot of the wormhole's crafting matrix
    SetMatrixSlot {
        slot: usize,
        stack: Option<StoredStack>,
    },
    /// Replace the wormhole's order slot
    SetOrderStack { stack: Option<StoredStack> },
    ConfigureDevice {
        device: DeviceHandle,
        update: DeviceUpdate,
    },
    UnbindDevice { device: DeviceHandle },
}

/// Why a queued command was not applied
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandRejection {
    /// The session closed before the command was applied
    SessionClosed,
    /// The command needs a wormhole session
    WrongContainer,
    /// Not every ingredient was available
    IngredientsMissing,
    /// The device, slot or network could not be changed
    Failed(String),
}
