use log::{debug, warn};

use spatial_storage_shared::{
    sequence_greater_than, MessageError, StorageMessage, SyncIndex,
};

use crate::StorageView;

/// Result of handing a push to [`StorageClient::receive`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReceiveOutcome {
    Applied,
    /// The push was not newer than the last one applied and was dropped
    Stale,
}

/// Applies pushes for one open container in sync-index order.
///
/// Stack listings and machine listings are sequenced separately, so a late
/// listing of one kind never overwrites a newer listing of the same kind.
#[derive(Debug, Default)]
pub struct StorageClient {
    view: StorageView,
    last_stack_index: Option<SyncIndex>,
    last_machines_index: Option<SyncIndex>,
    applied_pushes: u64,
    stale_pushes: u64,
}

impl StorageClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &StorageView {
        &self.view
    }

    pub fn last_sync_index(&self) -> Option<SyncIndex> {
        self.last_stack_index
    }

    pub fn applied_pushes(&self) -> u64 {
        self.applied_pushes
    }

    pub fn stale_pushes(&self) -> u64 {
        self.stale_pushes
    }

    /// Decodes and applies one payload from the server
    pub fn receive(&mut self, payload: &[u8]) -> Result<ReceiveOutcome, MessageError> {
        let message = StorageMessage::from_bytes(payload)?;
        Ok(self.apply(message))
    }

    pub fn apply(&mut self, message: StorageMessage) -> ReceiveOutcome {
        let sync_index = message.sync_index();
        let last = match &message {
            StorageMessage::StackUpdate(_) => &mut self.last_stack_index,
            StorageMessage::LinkedMachinesUpdate(_) => &mut self.last_machines_index,
        };

        if let Some(previous) = *last {
            if !sequence_greater_than(sync_index, previous) {
                self.stale_pushes += 1;
                warn!(
                    "Dropping stale storage push {} (last applied {})",
                    sync_index, previous
                );
                return ReceiveOutcome::Stale;
            }
        }
        *last = Some(sync_index);

        match message {
            StorageMessage::StackUpdate(update) => {
                debug!(
                    "Applied stack update {} with {} stacks",
                    sync_index,
                    update.stacks.len()
                );
                self.view.capacity = update.capacity;
                self.view.stacks = update.stacks;
            }
            StorageMessage::LinkedMachinesUpdate(update) => {
                self.view.devices = update.devices;
            }
        }
        self.applied_pushes += 1;
        ReceiveOutcome::Applied
    }

    /// Forgets everything, for when the container closes
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
