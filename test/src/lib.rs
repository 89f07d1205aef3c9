pub mod helpers;

pub use helpers::*;
pub use local_transport::{LoopbackReceiver, LoopbackSender};
pub use test_world::TestWorld;
