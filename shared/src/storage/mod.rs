pub mod capacity_ledger;
pub mod error;
pub mod persist;
pub mod query;
pub mod storage_network;
