/// INTEGRATION TESTS: Container session lifecycle
///
/// Opening, exclusivity per container kind, and every way a session can be
/// closed by the tick loop.

use spatial_storage_server::{
    CloseReason, ContainerKind, ContainerTarget, OpenFailure, ServerConfig, SessionClosedEvent,
    SessionOpenedEvent,
};
use spatial_storage_shared::{BlockEntityKind, DimensionId, GlobalPos, PlayerId, Vec3};
use spatial_storage_test::{StorageFixture, CONTROLLER, WORMHOLE};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn scenario_d_second_open_of_same_kind_is_refused() {
    init();
    let mut fixture = StorageFixture::new();
    let alice = fixture.player_at(1, &CONTROLLER);
    let bob = fixture.player_at(2, &CONTROLLER);

    let first = fixture
        .server
        .open_session(&fixture.world, alice.player, ContainerTarget::Controller(CONTROLLER));
    let second = fixture
        .server
        .open_session(&fixture.world, bob.player, ContainerTarget::Controller(CONTROLLER));

    assert!(first.is_ok());
    assert_eq!(second, Err(OpenFailure::AlreadyOpen));
}

#[test]
fn different_kinds_observe_concurrently() {
    init();
    let mut fixture = StorageFixture::new();
    let alice = fixture.player_at(1, &CONTROLLER);
    let bob = fixture.player_at(2, &WORMHOLE);
    let carol = fixture.player_at(3, &WORMHOLE);

    assert!(fixture
        .server
        .open_session(&fixture.world, alice.player, ContainerTarget::Controller(CONTROLLER))
        .is_ok());
    assert!(fixture
        .server
        .open_session(&fixture.world, bob.player, ContainerTarget::Wormhole(WORMHOLE))
        .is_ok());
    assert!(fixture
        .server
        .open_session(&fixture.world, carol.player, ContainerTarget::Remote(CONTROLLER))
        .is_ok());
    assert_eq!(fixture.server.sessions_count(), 3);

    let opened: Vec<ContainerKind> = fixture
        .server
        .take_events()
        .read::<SessionOpenedEvent>()
        .map(|(_, _, kind)| kind)
        .collect();
    assert_eq!(
        opened,
        vec![
            ContainerKind::StorageController,
            ContainerKind::StableWormhole,
            ContainerKind::StorageRemote
        ]
    );
}

#[test]
fn multi_user_kinds_can_be_configured() {
    init();
    let config = ServerConfig {
        single_user_containers: vec![ContainerKind::StableWormhole],
        ..ServerConfig::default()
    };
    let mut fixture = StorageFixture::with_config(config);
    let alice = fixture.player_at(1, &CONTROLLER);
    let bob = fixture.player_at(2, &CONTROLLER);

    for player in [alice.player, bob.player] {
        assert!(fixture
            .server
            .open_session(&fixture.world, player, ContainerTarget::Controller(CONTROLLER))
            .is_ok());
    }
}

#[test]
fn closing_frees_the_slot() {
    init();
    let mut fixture = StorageFixture::new();
    let alice = fixture.player_at(1, &CONTROLLER);
    let bob = fixture.player_at(2, &CONTROLLER);
    let target = ContainerTarget::Controller(CONTROLLER);

    let key = fixture
        .server
        .open_session(&fixture.world, alice.player, target)
        .unwrap();
    fixture.server.close_session(&key).unwrap();

    assert!(fixture.server.close_session(&key).is_err());
    assert!(fixture
        .server
        .open_session(&fixture.world, bob.player, target)
        .is_ok());
}

#[test]
fn open_checks_distance_from_the_block_centre() {
    init();
    let mut fixture = StorageFixture::new();
    let player = PlayerId(1);
    let center = CONTROLLER.pos.center();
    let target = ContainerTarget::Controller(CONTROLLER);

    // exactly 8 blocks away is still in reach
    fixture.world.move_player(
        player,
        DimensionId::OVERWORLD,
        Vec3::new(center.x + 8.0, center.y, center.z),
    );
    let key = fixture
        .server
        .open_session(&fixture.world, player, target)
        .unwrap();
    fixture.server.close_session(&key).unwrap();

    fixture.world.move_player(
        player,
        DimensionId::OVERWORLD,
        Vec3::new(center.x + 8.01, center.y, center.z),
    );
    assert_eq!(
        fixture.server.open_session(&fixture.world, player, target),
        Err(OpenFailure::TooFar)
    );

    fixture
        .world
        .move_player(player, DimensionId::NETHER, center);
    assert_eq!(
        fixture.server.open_session(&fixture.world, player, target),
        Err(OpenFailure::TooFar)
    );
}

#[test]
fn invalid_controller_is_reported_before_distance() {
    init();
    let mut fixture = StorageFixture::new();
    let far_away = PlayerId(1);
    fixture
        .world
        .move_player(far_away, DimensionId::OVERWORLD, Vec3::new(900.0, 64.0, 900.0));

    let missing = GlobalPos::overworld(100, 64, 100);
    assert_eq!(
        fixture
            .server
            .open_session(&fixture.world, far_away, ContainerTarget::Controller(missing)),
        Err(OpenFailure::ControllerInvalid)
    );

    fixture.world.unload_chunk_at(&CONTROLLER);
    assert_eq!(
        fixture
            .server
            .open_session(&fixture.world, far_away, ContainerTarget::Remote(CONTROLLER)),
        Err(OpenFailure::ControllerInvalid)
    );
}

#[test]
fn unlinked_wormhole_cannot_be_opened() {
    init();
    let mut fixture = StorageFixture::new();
    let alice = fixture.player_at(1, &WORMHOLE);
    fixture
        .server
        .unlink_terminal(&mut fixture.world, WORMHOLE)
        .unwrap();

    assert_eq!(
        fixture
            .server
            .open_session(&fixture.world, alice.player, ContainerTarget::Wormhole(WORMHOLE)),
        Err(OpenFailure::ControllerInvalid)
    );
    assert_eq!(fixture.world.bool_property(&WORMHOLE, "linked"), Some(false));
}

#[test]
fn tick_closes_sessions_that_lost_their_container() {
    init();
    let mut fixture = StorageFixture::new();
    let walker = fixture.player_at(1, &CONTROLLER);
    let leaver = fixture.player_at(2, &WORMHOLE);
    let remote_user = PlayerId(3);
    fixture
        .world
        .move_player(remote_user, DimensionId::OVERWORLD, Vec3::new(500.0, 70.0, 500.0));

    let walking = fixture
        .server
        .open_session(&fixture.world, walker.player, ContainerTarget::Controller(CONTROLLER))
        .unwrap();
    let leaving = fixture
        .server
        .open_session(&fixture.world, leaver.player, ContainerTarget::Wormhole(WORMHOLE))
        .unwrap();
    let remote = fixture
        .server
        .open_session(&fixture.world, remote_user, ContainerTarget::Remote(CONTROLLER))
        .unwrap();
    fixture.server.take_events();

    fixture.world.stand_next_to(walker.player, &GlobalPos::overworld(30, 64, 0));
    fixture.world.disconnect(&leaver.player);
    fixture.server.tick(&fixture.world, 1);

    let closed: Vec<_> = fixture
        .server
        .take_events()
        .read::<SessionClosedEvent>()
        .map(|(key, _, reason)| (key, reason))
        .collect();
    assert_eq!(
        closed,
        vec![
            (walking, CloseReason::OutOfRange),
            (leaving, CloseReason::PlayerGone)
        ]
    );
    assert!(fixture.server.session(&remote).is_some());

    fixture.world.unload_chunk_at(&CONTROLLER);
    fixture.server.tick(&fixture.world, 2);
    let closed: Vec<_> = fixture
        .server
        .take_events()
        .read::<SessionClosedEvent>()
        .collect();
    assert_eq!(
        closed,
        vec![(remote, remote_user, CloseReason::NetworkUnreachable)]
    );
}

#[test]
fn removing_blocks_closes_their_sessions() {
    init();
    let mut fixture = StorageFixture::new();
    let alice = fixture.player_at(1, &CONTROLLER);
    let bob = fixture.player_at(2, &WORMHOLE);

    let direct = fixture
        .server
        .open_session(&fixture.world, alice.player, ContainerTarget::Controller(CONTROLLER))
        .unwrap();
    let wormhole = fixture
        .server
        .open_session(&fixture.world, bob.player, ContainerTarget::Wormhole(WORMHOLE))
        .unwrap();
    fixture.server.take_events();

    fixture.world.break_block(&WORMHOLE);
    fixture.server.on_block_removed(&mut fixture.world, WORMHOLE);
    assert!(fixture.server.session(&wormhole).is_none());
    assert!(fixture.server.session(&direct).is_some());

    fixture.world.break_block(&CONTROLLER);
    fixture.server.on_block_removed(&mut fixture.world, CONTROLLER);
    assert!(fixture.server.session(&direct).is_none());

    let reasons: Vec<CloseReason> = fixture
        .server
        .take_events()
        .read::<SessionClosedEvent>()
        .map(|(_, _, reason)| reason)
        .collect();
    assert_eq!(
        reasons,
        vec![CloseReason::ContainerRemoved, CloseReason::ContainerRemoved]
    );
}

#[test]
fn relinking_a_wormhole_closes_its_session() {
    init();
    let mut fixture = StorageFixture::new();
    let other = GlobalPos::overworld(80, 64, 80);
    fixture
        .world
        .place_block(other, BlockEntityKind::StorageController);
    fixture
        .server
        .place_controller(&mut fixture.world, other)
        .unwrap();
    let alice = fixture.player_at(1, &WORMHOLE);

    let key = fixture
        .server
        .open_session(&fixture.world, alice.player, ContainerTarget::Wormhole(WORMHOLE))
        .unwrap();
    fixture
        .server
        .link_terminal(&mut fixture.world, WORMHOLE, other)
        .unwrap();
    fixture.server.tick(&fixture.world, 1);

    assert!(fixture.server.session(&key).is_none());
}
