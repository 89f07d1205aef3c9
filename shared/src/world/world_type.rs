use crate::{BlockEntityHandle, BlockProperty, DimensionId, GlobalPos, PlayerId, Vec3};

/// Read access to the host world
pub trait WorldRefType {
    fn block_property(&self, pos: &GlobalPos, key: &str) -> Option<BlockProperty>;

    fn is_chunk_loaded(&self, pos: &GlobalPos) -> bool;

    fn block_entity_at(&self, pos: &GlobalPos) -> Option<BlockEntityHandle>;

    /// Current dimension and position of an online player
    fn player_position(&self, player: &PlayerId) -> Option<(DimensionId, Vec3)>;
}

/// Mutable access to the host world
pub trait WorldMutType: WorldRefType {
    fn set_block_property(&mut self, pos: &GlobalPos, key: &str, value: BlockProperty);
}
