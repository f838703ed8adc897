//! Port interfaces for the application layer
//!
//! Ports define the contract between the clip workflow and the external
//! collaborators (blob store, registry, clock, wallet). Implementations live in
//! `ic-infra`; tests substitute fakes.

mod blob_store;
mod clock;
pub mod errors;
mod registry;
mod wallet;

pub use blob_store::BlobStorePort;
pub use clock::*;
pub use errors::{BlobStoreError, RegistryError};
pub use registry::RegistryPort;
pub use wallet::WalletPort;
