use std::default::Default;

use spatial_storage_shared::{GameTick, StorageConfig};

use crate::ContainerKind;

/// Contains Config properties which will be used by the Server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Capacity of every storage network the server creates
    pub storage: StorageConfig,
    /// Open sessions receive a push on every tick that is a multiple of this
    pub sync_interval: GameTick,
    /// Maximum distance, in blocks, between a player's eyes and the centre
    /// of the block they interact with
    pub interaction_range: f64,
    /// Container kinds of which at most one session may be open per network
    pub single_user_containers: Vec<ContainerKind>,
}

impl ServerConfig {
    pub fn is_single_user(&self, kind: ContainerKind) -> bool {
        self.single_user_containers.contains(&kind)
    }

    pub(crate) fn interaction_range_sq(&self) -> f64 {
        self.interaction_range * self.interaction_range
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            sync_interval: 40,
            interaction_range: 8.0,
            single_user_containers: ContainerKind::ALL.to_vec(),
        }
    }
}
