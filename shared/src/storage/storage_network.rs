use std::collections::BTreeMap;

use log::{debug, info};

use crate::{
    CapacityLedger, CapacityTier, DeviceBinding, DeviceError, DeviceHandle, DeviceLink,
    DeviceUpdate, GlobalPos, ItemCatalog, ItemKind, LinkedDeviceDirectory, StackQuery,
    StorageConfig, StoredStack,
};

use super::error::StorageError;

/// The item store formed by one controller and its stabilizers.
///
/// Contents live in an ordered map so every listing enumerates kinds in
/// the same order. Every mutation bumps [`Self::revision`], which the
/// synchronizer compares against what each client last received.
///
/// Operations on a destroyed network panic.
#[derive(Clone, Debug)]
pub struct StorageNetwork {
    controller: GlobalPos,
    config: StorageConfig,
    contents: BTreeMap<ItemKind, u64>,
    ledger: CapacityLedger,
    devices: LinkedDeviceDirectory,
    modules: BTreeMap<CapacityTier, u32>,
    revision: u64,
    destroyed: bool,
}

impl StorageNetwork {
    pub fn new(controller: GlobalPos, config: StorageConfig) -> Self {
        let (max_types, max_total_count) = config.limits_for(&BTreeMap::new());
        Self {
            controller,
            config,
            contents: BTreeMap::new(),
            ledger: CapacityLedger::new(max_types, max_total_count),
            devices: LinkedDeviceDirectory::new(),
            modules: BTreeMap::new(),
            revision: 0,
            destroyed: false,
        }
    }

    pub(crate) fn from_parts(
        controller: GlobalPos,
        config: StorageConfig,
        contents: BTreeMap<ItemKind, u64>,
        ledger: CapacityLedger,
        devices: LinkedDeviceDirectory,
        modules: BTreeMap<CapacityTier, u32>,
    ) -> Self {
        Self {
            controller,
            config,
            contents,
            ledger,
            devices,
            modules,
            revision: 0,
            destroyed: false,
        }
    }

    fn assert_live(&self, operation: &str) {
        if self.destroyed {
            panic!(
                "StorageNetwork at {}: cannot {} after the network was destroyed",
                self.controller, operation
            );
        }
    }

    /// Bumps [`Self::revision`] so every open session gets a fresh push.
    /// Mutations call this themselves; state kept outside the network, like
    /// a terminal's crafting grid, calls it directly.
    pub fn mark_dirty(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    // Accessors

    pub fn controller(&self) -> GlobalPos {
        self.controller
    }

    pub fn ledger(&self) -> &CapacityLedger {
        &self.ledger
    }

    pub fn devices(&self) -> &LinkedDeviceDirectory {
        &self.devices
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn installed_modules(&self) -> &BTreeMap<CapacityTier, u32> {
        &self.modules
    }

    pub fn count(&self, kind: &ItemKind) -> u64 {
        self.assert_live("count items");
        self.contents.get(kind).copied().unwrap_or(0)
    }

    pub fn contains(&self, kind: &ItemKind) -> bool {
        self.assert_live("look up items");
        self.contents.contains_key(kind)
    }

    pub fn can_accept(&self, kind: &ItemKind, amount: u64) -> bool {
        self.assert_live("check capacity");
        self.ledger.can_accept(self.count(kind), amount)
    }

    // Contents

    /// Stores as much of `stack` as the limits allow and hands back the rest.
    pub fn insert(&mut self, stack: StoredStack) -> StoredStack {
        self.assert_live("insert");

        let StoredStack { kind, quantity } = stack;
        let held = self.count(&kind);
        let accepted = self.ledger.accepted_amount(held, quantity);

        if accepted > 0 {
            self.ledger.record_insert(held, accepted);
            self.contents.insert(kind.clone(), held + accepted);
            self.mark_dirty();
            debug_assert!(self.is_consistent());
            debug!(
                "StorageNetwork at {}: stored {} x {}",
                self.controller, accepted, kind
            );
        }

        StoredStack::new(kind, quantity - accepted)
    }

    /// Removes up to `amount` of `kind`. With `simulate` nothing changes
    /// and the result only reports what would have been removed.
    pub fn extract(&mut self, kind: &ItemKind, amount: u64, simulate: bool) -> StoredStack {
        self.assert_live("extract");

        let held = self.count(kind);
        let taken = held.min(amount);
        if simulate || taken == 0 {
            return StoredStack::new(kind.clone(), taken);
        }

        self.ledger.record_remove(held, taken);
        if taken == held {
            self.contents.remove(kind);
        } else {
            self.contents.insert(kind.clone(), held - taken);
        }
        self.mark_dirty();
        debug_assert!(self.is_consistent());

        StoredStack::new(kind.clone(), taken)
    }

    /// Extracts every requested stack in full, or nothing at all. Requests
    /// for the same kind are summed before checking availability.
    pub fn extract_batch(&mut self, requests: &[StoredStack]) -> Option<Vec<StoredStack>> {
        self.assert_live("extract a batch");

        let mut needed: BTreeMap<&ItemKind, u64> = BTreeMap::new();
        for request in requests {
            let total = needed.entry(&request.kind).or_insert(0);
            *total = total.checked_add(request.quantity)?;
        }
        if needed.iter().any(|(kind, amount)| self.count(kind) < *amount) {
            return None;
        }

        let extracted = requests
            .iter()
            .map(|request| self.extract(&request.kind, request.quantity, false))
            .collect();
        Some(extracted)
    }

    /// Snapshot of all stacks in the stable content order
    pub fn stacks(&self) -> Vec<StoredStack> {
        self.assert_live("list stacks");
        self.contents
            .iter()
            .map(|(kind, quantity)| StoredStack::new(kind.clone(), *quantity))
            .collect()
    }

    /// Raw predicate query for search front-ends, in content order
    pub fn query_with<F: Fn(&StoredStack) -> bool>(&self, predicate: F) -> Vec<StoredStack> {
        let mut stacks = self.stacks();
        stacks.retain(|stack| predicate(stack));
        stacks
    }

    pub fn query(&self, query: &StackQuery, catalog: &dyn ItemCatalog) -> Vec<StoredStack> {
        let mut stacks = self.stacks();
        query.apply(&mut stacks, catalog);
        stacks
    }

    // Capacity modules

    pub fn install_capacity_module(&mut self, tier: CapacityTier) {
        self.assert_live("install a stabilizer");

        *self.modules.entry(tier).or_insert(0) += 1;
        self.apply_limits();
        info!(
            "StorageNetwork at {}: installed {:?} stabilizer, limits now {} types / {} items",
            self.controller,
            tier,
            self.ledger.max_types(),
            self.ledger.max_total_count()
        );
    }

    pub fn remove_capacity_module(&mut self, tier: CapacityTier) -> Result<(), StorageError> {
        self.assert_live("remove a stabilizer");

        let Some(installed) = self.modules.get_mut(&tier) else {
            return Err(StorageError::ModuleNotInstalled {
                controller: self.controller.to_string(),
                tier,
            });
        };
        *installed -= 1;
        if *installed == 0 {
            self.modules.remove(&tier);
        }
        self.apply_limits();

        if self.ledger.is_over_capacity() {
            info!(
                "StorageNetwork at {}: over capacity after removing {:?} stabilizer, inserts blocked",
                self.controller, tier
            );
        }
        Ok(())
    }

    fn apply_limits(&mut self) {
        let (max_types, max_total_count) = self.config.limits_for(&self.modules);
        self.ledger.resize(max_types, max_total_count);
        self.mark_dirty();
    }

    // Linked devices

    pub fn bind_device(&mut self, device: DeviceHandle, binding: DeviceBinding) -> Option<DeviceLink> {
        self.assert_live("bind a device");
        let previous = self.devices.bind(device, binding);
        self.mark_dirty();
        previous
    }

    pub fn unbind_device(&mut self, device: &DeviceHandle) -> Option<DeviceLink> {
        self.assert_live("unbind a device");
        let removed = self.devices.unbind(device);
        if removed.is_some() {
            self.mark_dirty();
        }
        removed
    }

    pub fn configure_device(&mut self, device: &DeviceHandle, update: DeviceUpdate) -> Result<(), DeviceError> {
        self.assert_live("configure a device");
        self.devices.configure(device, update)?;
        self.mark_dirty();
        Ok(())
    }

    pub fn list_devices(&self) -> Vec<DeviceLink> {
        self.assert_live("list devices");
        self.devices.list_devices()
    }

    // Teardown

    /// Drains every stack so the caller can drop them into the world. The
    /// network is unusable afterwards.
    pub fn destroy(&mut self) -> Vec<StoredStack> {
        self.assert_live("destroy");

        let drops: Vec<StoredStack> = std::mem::take(&mut self.contents)
            .into_iter()
            .map(|(kind, quantity)| StoredStack::new(kind, quantity))
            .collect();
        self.ledger = CapacityLedger::new(0, 0);
        self.devices = LinkedDeviceDirectory::new();
        self.destroyed = true;
        self.mark_dirty();

        info!(
            "StorageNetwork at {}: destroyed, ejecting {} stacks",
            self.controller,
            drops.len()
        );
        drops
    }

    /// Whether the ledger counters agree with the stored stacks
    pub fn is_consistent(&self) -> bool {
        let total: u64 = self.contents.values().sum();
        self.contents.values().all(|quantity| *quantity > 0)
            && self.ledger.type_count() == self.contents.len()
            && self.ledger.total_count() == total
    }
}
