use spatial_storage_server::{ServerConfig, StorageServer};
use spatial_storage_shared::{BlockEntityKind, GlobalPos, MapItemCatalog, PlayerId};

use crate::{LoopbackReceiver, LoopbackSender, TestWorld};

pub const CONTROLLER: GlobalPos = GlobalPos::overworld(0, 64, 0);
pub const WORMHOLE: GlobalPos = GlobalPos::overworld(40, 64, 40);

/// A small catalog covering the items used across tests
pub fn catalog() -> MapItemCatalog {
    let mut catalog = MapItemCatalog::new();
    catalog
        .register("iron_ingot", "Iron Ingot", &["forge:ingots/iron", "forge:ingots"])
        .register("gold_ingot", "Gold Ingot", &["forge:ingots/gold", "forge:ingots"])
        .register("cobblestone", "Cobblestone", &["forge:cobblestone"])
        .register("stick", "Stick", &["forge:rods/wooden"])
        .register("occultism:otherstone", "Otherstone", &["forge:stone"])
        .register("occultism:datura_seeds", "Demon's Dream Seeds", &["forge:seeds"]);
    catalog
}

/// A server with one placed controller and a wormhole linked to it,
/// wired to a loopback transport
pub struct StorageFixture {
    pub server: StorageServer,
    pub world: TestWorld,
    pub sender: LoopbackSender,
    pub receiver: LoopbackReceiver,
}

impl StorageFixture {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        let mut world = TestWorld::new();
        world.place_block(CONTROLLER, BlockEntityKind::StorageController);
        world.place_block(WORMHOLE, BlockEntityKind::StableWormhole);

        let (sender, receiver) = LoopbackSender::pair();
        let mut server = StorageServer::new(config);
        server.io_load(Box::new(sender.clone()));
        server
            .place_controller(&mut world, CONTROLLER)
            .expect("controller block is placed");
        server
            .place_terminal(&mut world, WORMHOLE)
            .expect("wormhole block is placed");
        server
            .link_terminal(&mut world, WORMHOLE, CONTROLLER)
            .expect("controller exists");

        Self {
            server,
            world,
            sender,
            receiver,
        }
    }

    /// Spawns a player next to `block` and returns their client
    pub fn player_at(&mut self, id: u64, block: &GlobalPos) -> crate::TestClient {
        let player = PlayerId(id);
        self.world.stand_next_to(player, block);
        crate::TestClient::new(player)
    }
}

impl Default for StorageFixture {
    fn default() -> Self {
        Self::new()
    }
}
