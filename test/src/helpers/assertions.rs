/// Assert that a client's view matches the server's network exactly
#[macro_export]
macro_rules! assert_view_matches {
    ($client:expr, $server:expr, $controller:expr) => {
        let network = $server
            .network(&$controller)
            .expect("controller has a network");
        assert_eq!(
            $client.storage.view().stacks(),
            network.stacks().as_slice(),
            "client stacks diverged from the server"
        );
        assert_eq!(
            $client.storage.view().devices(),
            network.list_devices().as_slice(),
            "client devices diverged from the server"
        );
        assert_eq!(
            *$client.storage.view().capacity(),
            spatial_storage_shared::CapacitySnapshot::from(network.ledger()),
            "client capacity diverged from the server"
        );
    };
}

/// Assert that the network's ledger agrees with its contents
#[macro_export]
macro_rules! assert_consistent {
    ($network:expr) => {
        assert!(
            $network.is_consistent(),
            "ledger {:?} disagrees with stacks {:?}",
            $network.ledger(),
            $network.stacks()
        );
    };
}
