/// INTEGRATION TESTS: Searching and sorting listings
///
/// The server network and the client view answer the same query the same
/// way once the view is in sync.

use spatial_storage_server::ContainerTarget;
use spatial_storage_shared::{
    ItemData, ItemKind, QueryToken, SortDirection, SortKey, StackQuery, StoredStack,
};
use spatial_storage_test::{catalog, tick_until, StorageFixture, CONTROLLER};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn stack(id: &str, quantity: u64) -> StoredStack {
    StoredStack::new(ItemKind::new(id), quantity)
}

fn stocked() -> StorageFixture {
    let mut fixture = StorageFixture::new();
    let network = fixture.server.network_mut(&CONTROLLER).unwrap();
    network.insert(stack("iron_ingot", 64));
    network.insert(stack("gold_ingot", 12));
    network.insert(stack("cobblestone", 900));
    network.insert(stack("occultism:otherstone", 30));
    network.insert(stack("occultism:datura_seeds", 5));

    let data = ItemData {
        custom_name: Some("Lucky Stick".into()),
        ..ItemData::default()
    };
    network.insert(StoredStack::new(ItemKind::with_data("stick", data), 1));
    fixture
}

fn ids(stacks: &[StoredStack]) -> Vec<String> {
    stacks
        .iter()
        .map(|stack| stack.kind.id().to_string())
        .collect()
}

#[test]
fn quantity_descending_is_the_default() {
    init();
    let fixture = stocked();
    let network = fixture.server.network(&CONTROLLER).unwrap();

    let listed = network.query(&StackQuery::default(), &catalog());
    let quantities: Vec<u64> = listed.iter().map(|stack| stack.quantity).collect();
    assert_eq!(quantities, vec![900, 64, 30, 12, 5, 1]);
}

#[test]
fn namespace_sort_groups_by_mod() {
    init();
    let fixture = stocked();
    let network = fixture.server.network(&CONTROLLER).unwrap();

    let query = StackQuery::new(SortKey::Namespace, SortDirection::Ascending);
    assert_eq!(
        ids(&network.query(&query, &catalog())),
        vec![
            "minecraft:cobblestone",
            "minecraft:gold_ingot",
            "minecraft:iron_ingot",
            "minecraft:stick",
            "occultism:datura_seeds",
            "occultism:otherstone",
        ]
    );
}

#[test]
fn tokens_narrow_the_listing() {
    init();
    let fixture = stocked();
    let network = fixture.server.network(&CONTROLLER).unwrap();
    let catalog = catalog();

    let ingots = StackQuery::new(SortKey::DisplayName, SortDirection::Ascending)
        .token(QueryToken::Tag("ingots".into()));
    assert_eq!(
        ids(&network.query(&ingots, &catalog)),
        vec!["minecraft:gold_ingot", "minecraft:iron_ingot"]
    );

    let occult_stone = StackQuery::default()
        .token(QueryToken::Namespace("OCCULT".into()))
        .token(QueryToken::Tag("stone".into()));
    assert_eq!(
        ids(&network.query(&occult_stone, &catalog)),
        vec!["occultism:otherstone"]
    );

    let renamed = StackQuery::default().token(QueryToken::Text("lucky".into()));
    assert_eq!(ids(&network.query(&renamed, &catalog)), vec!["minecraft:stick"]);

    let nothing = StackQuery::default().token(QueryToken::Text("netherite".into()));
    assert!(network.query(&nothing, &catalog).is_empty());
}

#[test]
fn client_view_answers_like_the_server() {
    init();
    let mut fixture = stocked();
    let mut alice = fixture.player_at(1, &CONTROLLER);
    fixture
        .server
        .open_session(&fixture.world, alice.player, ContainerTarget::Controller(CONTROLLER))
        .unwrap();
    tick_until(
        &mut fixture.server,
        &fixture.world,
        1,
        40,
        &fixture.receiver,
        &mut [&mut alice],
    );

    let catalog = catalog();
    let queries = [
        StackQuery::default(),
        StackQuery::new(SortKey::DisplayName, SortDirection::Descending),
        StackQuery::new(SortKey::Namespace, SortDirection::Ascending)
            .token(QueryToken::Tag("forge".into())),
    ];
    let network = fixture.server.network(&CONTROLLER).unwrap();
    for query in &queries {
        assert_eq!(
            alice.storage.view().query(query, &catalog),
            network.query(query, &catalog)
        );
    }
}

#[test]
fn predicate_queries_keep_content_order() {
    init();
    let fixture = stocked();
    let network = fixture.server.network(&CONTROLLER).unwrap();

    let small = network.query_with(|stack| stack.quantity < 40);
    let expected: Vec<StoredStack> = network
        .stacks()
        .into_iter()
        .filter(|stack| stack.quantity < 40)
        .collect();
    assert_eq!(small.len(), 4);
    assert_eq!(small, expected);
}
