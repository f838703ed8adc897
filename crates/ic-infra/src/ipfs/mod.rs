//! IPFS-backed blob store.

mod http_blob_store;

pub use http_blob_store::{IpfsClientConfig, IpfsHttpBlobStore};
