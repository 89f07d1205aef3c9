/// INTEGRATION TESTS: Stable wormholes
///
/// Crafting slots, recipe crafting through the linked network and how a
/// wormhole resolves its controller.

use spatial_storage_server::{
    CommandRejectedEvent, CommandRejection, ContainerTarget, DeliverEvent, StorageCommand,
    StorageServerError, TerminalError,
};
use spatial_storage_shared::{ItemKind, StoredStack};
use spatial_storage_test::{tick_until, StorageFixture, CONTROLLER, WORMHOLE};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn stack(id: &str, quantity: u64) -> StoredStack {
    StoredStack::new(ItemKind::new(id), quantity)
}

#[test]
fn slot_edits_push_the_linked_network() {
    init();
    let mut fixture = StorageFixture::new();
    let mut alice = fixture.player_at(1, &WORMHOLE);
    let key = fixture
        .server
        .open_session(&fixture.world, alice.player, ContainerTarget::Wormhole(WORMHOLE))
        .unwrap();
    tick_until(
        &mut fixture.server,
        &fixture.world,
        1,
        40,
        &fixture.receiver,
        &mut [&mut alice],
    );
    assert_eq!(alice.storage.applied_pushes(), 2);

    fixture
        .server
        .queue_command(
            &key,
            StorageCommand::SetMatrixSlot {
                slot: 0,
                stack: Some(stack("iron_ingot", 1)),
            },
        )
        .unwrap();
    tick_until(
        &mut fixture.server,
        &fixture.world,
        41,
        80,
        &fixture.receiver,
        &mut [&mut alice],
    );
    assert_eq!(alice.storage.applied_pushes(), 4);

    fixture
        .server
        .queue_command(
            &key,
            StorageCommand::SetOrderStack {
                stack: Some(stack("gold_ingot", 4)),
            },
        )
        .unwrap();
    tick_until(
        &mut fixture.server,
        &fixture.world,
        81,
        120,
        &fixture.receiver,
        &mut [&mut alice],
    );
    assert_eq!(alice.storage.applied_pushes(), 6);

    let state = fixture.server.terminal(&WORMHOLE).unwrap().state();
    assert_eq!(state.matrix_slot(0), Some(&stack("iron_ingot", 1)));
    assert_eq!(state.order_stack(), Some(&stack("gold_ingot", 4)));
}

#[test]
fn replaced_slot_contents_go_back_to_the_player() {
    init();
    let mut fixture = StorageFixture::new();
    let alice = fixture.player_at(1, &WORMHOLE);
    let key = fixture
        .server
        .open_session(&fixture.world, alice.player, ContainerTarget::Wormhole(WORMHOLE))
        .unwrap();

    for item in ["stick", "cobblestone"] {
        fixture
            .server
            .queue_command(
                &key,
                StorageCommand::SetMatrixSlot {
                    slot: 8,
                    stack: Some(stack(item, 3)),
                },
            )
            .unwrap();
    }
    fixture
        .server
        .queue_command(
            &key,
            StorageCommand::SetMatrixSlot {
                slot: 9,
                stack: Some(stack("stick", 1)),
            },
        )
        .unwrap();
    fixture.server.tick(&fixture.world, 1);

    let mut events = fixture.server.take_events();
    let delivered: Vec<_> = events.read::<DeliverEvent>().collect();
    assert_eq!(delivered, vec![(alice.player, stack("stick", 3))]);

    let rejected: Vec<_> = events.read::<CommandRejectedEvent>().collect();
    assert_eq!(rejected.len(), 1);
    assert!(matches!(rejected[0].2, CommandRejection::Failed(_)));
}

#[test]
fn crafting_takes_every_ingredient_or_none() {
    init();
    let mut fixture = StorageFixture::new();
    let alice = fixture.player_at(1, &WORMHOLE);
    {
        let network = fixture.server.network_mut(&CONTROLLER).unwrap();
        network.insert(stack("iron_ingot", 3));
        network.insert(stack("stick", 3));
    }
    let key = fixture
        .server
        .open_session(&fixture.world, alice.player, ContainerTarget::Wormhole(WORMHOLE))
        .unwrap();

    let pickaxe = StorageCommand::Craft {
        ingredients: vec![stack("iron_ingot", 3), stack("stick", 2)],
        output: stack("iron_pickaxe", 1),
    };
    fixture.server.queue_command(&key, pickaxe.clone()).unwrap();
    fixture.server.queue_command(&key, pickaxe).unwrap();
    fixture.server.tick(&fixture.world, 1);

    let mut events = fixture.server.take_events();
    let delivered: Vec<_> = events.read::<DeliverEvent>().collect();
    assert_eq!(delivered, vec![(alice.player, stack("iron_pickaxe", 1))]);
    let rejected: Vec<_> = events.read::<CommandRejectedEvent>().collect();
    assert_eq!(
        rejected,
        vec![(key, alice.player, CommandRejection::IngredientsMissing)]
    );

    let network = fixture.server.network(&CONTROLLER).unwrap();
    assert_eq!(network.stacks(), vec![stack("stick", 1)]);
}

#[test]
fn crafting_needs_a_wormhole_session() {
    init();
    let mut fixture = StorageFixture::new();
    let alice = fixture.player_at(1, &CONTROLLER);
    fixture
        .server
        .network_mut(&CONTROLLER)
        .unwrap()
        .insert(stack("stick", 2));
    let direct = fixture
        .server
        .open_session(&fixture.world, alice.player, ContainerTarget::Controller(CONTROLLER))
        .unwrap();
    let remote = fixture
        .server
        .open_session(&fixture.world, alice.player, ContainerTarget::Remote(CONTROLLER))
        .unwrap();

    fixture
        .server
        .queue_command(
            &direct,
            StorageCommand::Craft {
                ingredients: vec![stack("stick", 2)],
                output: stack("torch", 4),
            },
        )
        .unwrap();
    fixture
        .server
        .queue_command(&remote, StorageCommand::SetOrderStack { stack: None })
        .unwrap();
    fixture.server.tick(&fixture.world, 1);

    let reasons: Vec<CommandRejection> = fixture
        .server
        .take_events()
        .read::<CommandRejectedEvent>()
        .map(|(_, _, rejection)| rejection)
        .collect();
    assert_eq!(
        reasons,
        vec![CommandRejection::WrongContainer, CommandRejection::WrongContainer]
    );
    assert_eq!(
        fixture
            .server
            .network(&CONTROLLER)
            .unwrap()
            .count(&ItemKind::new("stick")),
        2
    );
}

#[test]
fn breaking_a_wormhole_drops_its_slots() {
    init();
    let mut fixture = StorageFixture::new();
    fixture
        .server
        .set_matrix_slot(&WORMHOLE, 1, Some(stack("stick", 1)))
        .unwrap();
    fixture
        .server
        .set_matrix_slot(&WORMHOLE, 5, Some(stack("iron_ingot", 2)))
        .unwrap();
    fixture
        .server
        .set_order_stack(&WORMHOLE, Some(stack("gold_ingot", 1)))
        .unwrap();

    fixture.world.break_block(&WORMHOLE);
    let drops = fixture
        .server
        .on_block_removed(&mut fixture.world, WORMHOLE);

    assert_eq!(
        drops,
        vec![
            stack("stick", 1),
            stack("iron_ingot", 2),
            stack("gold_ingot", 1)
        ]
    );
    assert!(fixture.server.terminal(&WORMHOLE).is_none());
    // the network keeps its contents
    assert!(fixture.server.network(&CONTROLLER).is_some());
}

#[test]
fn resolving_reports_why_the_network_is_unreachable() {
    init();
    let mut fixture = StorageFixture::new();
    assert_eq!(
        fixture
            .server
            .resolve_terminal(&fixture.world, &WORMHOLE)
            .unwrap()
            .controller(),
        CONTROLLER
    );

    assert!(matches!(
        fixture.server.resolve_terminal(&fixture.world, &CONTROLLER),
        Err(StorageServerError::TerminalNotFound { .. })
    ));

    fixture.world.unload_chunk_at(&CONTROLLER);
    assert!(matches!(
        fixture.server.resolve_terminal(&fixture.world, &WORMHOLE),
        Err(StorageServerError::Terminal(TerminalError::ChunkNotLoaded { .. }))
    ));
    fixture.world.load_chunk_at(&CONTROLLER);

    fixture.world.break_block(&CONTROLLER);
    fixture
        .server
        .on_block_removed(&mut fixture.world, CONTROLLER);
    assert!(matches!(
        fixture.server.resolve_terminal(&fixture.world, &WORMHOLE),
        Err(StorageServerError::Terminal(TerminalError::ControllerMissing { .. }))
    ));
    // the link is left dangling
    assert_eq!(
        fixture.server.terminal(&WORMHOLE).unwrap().linked_controller(),
        Some(CONTROLLER)
    );

    fixture
        .server
        .unlink_terminal(&mut fixture.world, WORMHOLE)
        .unwrap();
    assert!(matches!(
        fixture.server.resolve_terminal(&fixture.world, &WORMHOLE),
        Err(StorageServerError::Terminal(TerminalError::NotLinked { .. }))
    ));
}
