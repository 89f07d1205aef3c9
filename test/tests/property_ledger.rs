/// PROPERTY-BASED TESTS: Ledger and content invariants
///
/// Uses proptest to drive random operation sequences against a network.
///
/// Key invariants:
/// 1. The ledger always agrees with the stored stacks
/// 2. An insert never pushes the network over its limits
/// 3. No stored stack is ever empty
/// 4. Items are conserved: stored + handed back + extracted = inserted

use proptest::prelude::*;
use spatial_storage_shared::{
    CapacityTier, GlobalPos, ItemKind, StorageConfig, StorageNetwork, StoredStack,
};

#[derive(Clone, Debug)]
enum Op {
    Insert(usize, u64),
    Extract(usize, u64),
    Simulate(usize, u64),
    Batch(Vec<(usize, u64)>),
    Install(CapacityTier),
    Remove(CapacityTier),
}

const KINDS: [&str; 6] = [
    "iron_ingot",
    "gold_ingot",
    "cobblestone",
    "stick",
    "occultism:otherstone",
    "occultism:datura_seeds",
];

fn kind(index: usize) -> ItemKind {
    ItemKind::new(KINDS[index % KINDS.len()])
}

fn tier_strategy() -> impl Strategy<Value = CapacityTier> {
    prop_oneof![
        Just(CapacityTier::Tier1),
        Just(CapacityTier::Tier2),
        Just(CapacityTier::Tier3),
        Just(CapacityTier::Tier4),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..6, 0u64..200).prop_map(|(k, n)| Op::Insert(k, n)),
        3 => (0usize..6, 0u64..200).prop_map(|(k, n)| Op::Extract(k, n)),
        1 => (0usize..6, 0u64..200).prop_map(|(k, n)| Op::Simulate(k, n)),
        1 => prop::collection::vec((0usize..6, 1u64..50), 1..4).prop_map(Op::Batch),
        1 => tier_strategy().prop_map(Op::Install),
        1 => tier_strategy().prop_map(Op::Remove),
    ]
}

fn small_config() -> StorageConfig {
    let mut config = StorageConfig {
        base_max_types: 3,
        base_max_total_count: 300,
        ..StorageConfig::default()
    };
    for bonus in config.tier_bonuses.iter_mut() {
        bonus.types = 1;
        bonus.total_count = 100;
    }
    config
}

proptest! {
    /// Test that every operation leaves the ledger consistent with contents
    #[test]
    fn prop_ledger_tracks_contents(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut network = StorageNetwork::new(GlobalPos::overworld(0, 64, 0), small_config());
        let mut inserted: u64 = 0;
        let mut handed_out: u64 = 0;

        for op in ops {
            match op {
                Op::Insert(k, n) => {
                    let was_over = network.ledger().is_over_capacity();
                    let was_full = network.ledger().total_count() >= network.ledger().max_total_count();
                    let leftover = network.insert(StoredStack::new(kind(k), n));
                    prop_assert!(leftover.quantity <= n);
                    inserted += n;
                    handed_out += leftover.quantity;
                    if was_full {
                        prop_assert_eq!(leftover.quantity, n);
                    }
                    if !was_over {
                        prop_assert!(!network.ledger().is_over_capacity());
                    }
                }
                Op::Extract(k, n) => {
                    let held = network.count(&kind(k));
                    let taken = network.extract(&kind(k), n, false);
                    prop_assert_eq!(taken.quantity, held.min(n));
                    handed_out += taken.quantity;
                }
                Op::Simulate(k, n) => {
                    let before = network.stacks();
                    network.extract(&kind(k), n, true);
                    prop_assert_eq!(network.stacks(), before);
                }
                Op::Batch(requests) => {
                    let before = network.stacks();
                    let requests: Vec<StoredStack> = requests
                        .into_iter()
                        .map(|(k, n)| StoredStack::new(kind(k), n))
                        .collect();
                    match network.extract_batch(&requests) {
                        Some(taken) => {
                            handed_out += taken.iter().map(|stack| stack.quantity).sum::<u64>();
                        }
                        None => prop_assert_eq!(network.stacks(), before),
                    }
                }
                Op::Install(tier) => network.install_capacity_module(tier),
                Op::Remove(tier) => {
                    let _ = network.remove_capacity_module(tier);
                }
            }

            prop_assert!(network.is_consistent());
            prop_assert!(network.stacks().iter().all(|stack| stack.quantity > 0));
        }

        let stored = network.ledger().total_count();
        prop_assert_eq!(stored + handed_out, inserted);
    }

    /// Test that inserting and then extracting the same stack is a no-op
    #[test]
    fn prop_insert_extract_round_trip(
        seed in prop::collection::vec((0usize..6, 1u64..100), 0..5),
        k in 0usize..6,
        n in 1u64..100,
    ) {
        let mut network = StorageNetwork::new(GlobalPos::overworld(0, 64, 0), StorageConfig::default());
        for (seed_kind, amount) in seed {
            network.insert(StoredStack::new(kind(seed_kind), amount));
        }
        let before_stacks = network.stacks();
        let before_ledger = network.ledger().clone();

        let leftover = network.insert(StoredStack::new(kind(k), n));
        prop_assert_eq!(leftover.quantity, 0);
        let taken = network.extract(&kind(k), n, false);

        prop_assert_eq!(taken.quantity, n);
        prop_assert_eq!(network.stacks(), before_stacks);
        prop_assert_eq!(network.ledger(), &before_ledger);
    }

    /// Test that zero-amount extraction never changes the network
    #[test]
    fn prop_zero_extraction_is_idempotent(k in 0usize..6, amount in 0u64..500) {
        let mut network = StorageNetwork::new(GlobalPos::overworld(0, 64, 0), StorageConfig::default());
        network.insert(StoredStack::new(kind(k), amount));
        let revision = network.revision();
        let stacks = network.stacks();

        for index in 0..KINDS.len() {
            let taken = network.extract(&kind(index), 0, false);
            prop_assert_eq!(taken.quantity, 0);
        }

        prop_assert_eq!(network.revision(), revision);
        prop_assert_eq!(network.stacks(), stacks);
    }
}
