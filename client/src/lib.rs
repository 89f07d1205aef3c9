//! # Spatial Storage Client
//! A read-only view of the storage network behind an open container,
//! rebuilt from the snapshots the server pushes.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

mod storage_client;
mod storage_view;

pub use storage_client::{ReceiveOutcome, StorageClient};
pub use storage_view::StorageView;
