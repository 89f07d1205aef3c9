use spatial_storage_shared::{
    CapacitySnapshot, DeviceLink, ItemCatalog, ItemKind, StackQuery, StoredStack,
};

/// What the client currently knows about a network
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StorageView {
    pub(crate) capacity: CapacitySnapshot,
    pub(crate) stacks: Vec<StoredStack>,
    pub(crate) devices: Vec<DeviceLink>,
}

impl StorageView {
    pub fn capacity(&self) -> &CapacitySnapshot {
        &self.capacity
    }

    /// Stacks in the order the server lists them
    pub fn stacks(&self) -> &[StoredStack] {
        &self.stacks
    }

    pub fn devices(&self) -> &[DeviceLink] {
        &self.devices
    }

    pub fn count(&self, kind: &ItemKind) -> u64 {
        self.stacks
            .iter()
            .find(|stack| &stack.kind == kind)
            .map_or(0, |stack| stack.quantity)
    }

    /// Sorted and filtered listing for the storage screen
    pub fn query(&self, query: &StackQuery, catalog: &dyn ItemCatalog) -> Vec<StoredStack> {
        let mut stacks = self.stacks.clone();
        query.apply(&mut stacks, catalog);
        stacks
    }
}
