pub mod block;
pub mod world_type;
