/// Type and item counters of a storage network, checked against its limits.
///
/// The ledger never sees the content map. Every call takes `held`, the
/// quantity of the affected kind currently stored (zero when absent), and the
/// network keeps ledger and contents in step within a single operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapacityLedger {
    max_types: usize,
    max_total_count: u64,
    type_count: usize,
    total_count: u64,
}

impl CapacityLedger {
    pub fn new(max_types: usize, max_total_count: u64) -> Self {
        Self {
            max_types,
            max_total_count,
            type_count: 0,
            total_count: 0,
        }
    }

    pub(crate) fn restore(max_types: usize, max_total_count: u64, type_count: usize, total_count: u64) -> Self {
        Self {
            max_types,
            max_total_count,
            type_count,
            total_count,
        }
    }

    pub fn max_types(&self) -> usize {
        self.max_types
    }

    pub fn max_total_count(&self) -> u64 {
        self.max_total_count
    }

    pub fn type_count(&self) -> usize {
        self.type_count
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// True after a shrink left usage above the limits
    pub fn is_over_capacity(&self) -> bool {
        self.type_count > self.max_types || self.total_count > self.max_total_count
    }

    pub fn can_accept(&self, held: u64, amount: u64) -> bool {
        let Some(new_total) = self.total_count.checked_add(amount) else {
            return false;
        };
        if new_total > self.max_total_count {
            return false;
        }
        held > 0 || self.type_count < self.max_types
    }

    /// Largest part of `amount` that [`Self::can_accept`] admits
    pub fn accepted_amount(&self, held: u64, amount: u64) -> u64 {
        if held == 0 && self.type_count >= self.max_types {
            return 0;
        }
        amount.min(self.max_total_count.saturating_sub(self.total_count))
    }

    /// # Panics
    ///
    /// Panics if the insert was not admitted by [`Self::can_accept`]
    pub fn record_insert(&mut self, held: u64, amount: u64) {
        if amount == 0 {
            return;
        }
        if !self.can_accept(held, amount) {
            panic!(
                "CapacityLedger: cannot record insert of {} (held {}) with {}/{} types and {}/{} items. Check can_accept first.",
                amount, held, self.type_count, self.max_types, self.total_count, self.max_total_count
            );
        }

        self.total_count += amount;
        if held == 0 {
            self.type_count += 1;
        }
    }

    /// # Panics
    ///
    /// Panics if more is removed than is held
    pub fn record_remove(&mut self, held: u64, amount: u64) {
        if amount > held {
            panic!(
                "CapacityLedger: cannot record removal of {} when only {} is held",
                amount, held
            );
        }
        if amount == 0 {
            return;
        }
        if amount > self.total_count || (held == amount && self.type_count == 0) {
            panic!("CapacityLedger: removal of {} does not match the recorded totals", amount);
        }

        self.total_count -= amount;
        if held == amount {
            self.type_count -= 1;
        }
    }

    /// Changes the limits. Stored items are never evicted, so counts may
    /// end up above the new limits.
    pub fn resize(&mut self, max_types: usize, max_total_count: u64) {
        self.max_types = max_types;
        self.max_total_count = max_total_count;
    }
}
