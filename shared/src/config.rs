use std::collections::BTreeMap;

use spatial_storage_serde::{BitReader, BitWrite, Serde, SerdeErr};

/// Stabilizer tiers that can be attached to a storage controller
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CapacityTier {
    Tier1,
    Tier2,
    Tier3,
    Tier4,
}

impl CapacityTier {
    pub const ALL: [CapacityTier; 4] = [
        CapacityTier::Tier1,
        CapacityTier::Tier2,
        CapacityTier::Tier3,
        CapacityTier::Tier4,
    ];

    pub fn index(self) -> usize {
        match self {
            CapacityTier::Tier1 => 0,
            CapacityTier::Tier2 => 1,
            CapacityTier::Tier3 => 2,
            CapacityTier::Tier4 => 3,
        }
    }
}

impl Serde for CapacityTier {
    fn ser(&self, writer: &mut dyn BitWrite) {
        (self.index() as u8).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let index = u8::de(reader)?;
        CapacityTier::ALL
            .get(index as usize)
            .copied()
            .ok_or(SerdeErr::InvalidVariant {
                kind: "CapacityTier",
                value: index as u64,
            })
    }
}

/// Extra capacity granted by one installed stabilizer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierBonus {
    /// Additional distinct item kinds
    pub types: usize,
    /// Additional total item count
    pub total_count: u64,
}

impl TierBonus {
    pub const fn new(types: usize, total_count: u64) -> Self {
        Self { types, total_count }
    }
}

/// Contains Config properties which determine the capacity of every
/// storage network
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    /// Distinct item kinds a bare controller can hold
    pub base_max_types: usize,
    /// Total items a bare controller can hold
    pub base_max_total_count: u64,
    /// Bonus per stabilizer, indexed by [`CapacityTier::index`]
    pub tier_bonuses: [TierBonus; 4],
}

impl StorageConfig {
    pub fn bonus(&self, tier: CapacityTier) -> TierBonus {
        self.tier_bonuses[tier.index()]
    }

    /// Limits of a controller carrying the given stabilizers, as
    /// `(max_types, max_total_count)`
    pub fn limits_for(&self, modules: &BTreeMap<CapacityTier, u32>) -> (usize, u64) {
        let mut max_types = self.base_max_types;
        let mut max_total_count = self.base_max_total_count;
        for (tier, installed) in modules {
            let bonus = self.bonus(*tier);
            max_types = max_types.saturating_add(bonus.types.saturating_mul(*installed as usize));
            max_total_count =
                max_total_count.saturating_add(bonus.total_count.saturating_mul(*installed as u64));
        }
        (max_types, max_total_count)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_max_types: 128,
            base_max_total_count: 256_000,
            tier_bonuses: [
                TierBonus::new(64, 128_000),
                TierBonus::new(128, 256_000),
                TierBonus::new(256, 512_000),
                TierBonus::new(512, 1_024_000),
            ],
        }
    }
}
