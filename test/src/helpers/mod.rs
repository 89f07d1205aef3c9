pub mod assertions;
pub mod fixtures;
pub mod test_client;

pub use fixtures::{catalog, StorageFixture, CONTROLLER, WORMHOLE};
pub use packet_exchange::{deliver, tick_and_deliver, tick_until};
pub use test_client::TestClient;
