use spatial_storage_client::{ReceiveOutcome, StorageClient};
use spatial_storage_shared::PlayerId;

use crate::LoopbackReceiver;

/// A player's client: receives its pushes from the loopback and keeps a
/// [`StorageClient`] view
pub struct TestClient {
    pub player: PlayerId,
    pub storage: StorageClient,
}

impl TestClient {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            storage: StorageClient::new(),
        }
    }

    /// Applies everything queued for this player, returning the outcome of
    /// each payload in arrival order
    pub fn receive_all(&mut self, receiver: &LoopbackReceiver) -> Vec<ReceiveOutcome> {
        receiver
            .drain_for(&self.player)
            .iter()
            .map(|payload| {
                self.storage
                    .receive(payload)
                    .expect("server pushes always decode")
            })
            .collect()
    }
}
