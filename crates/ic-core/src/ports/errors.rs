use thiserror::Error;

use crate::ids::TxHandle;

/// Blob store failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlobStoreError {
    /// Upload could not reach the store or was refused.
    #[error("blob store unavailable: {0}")]
    StoreUnavailable(String),

    /// Fetch failed at the transport level or returned a non-success status.
    #[error("blob not found: {0}")]
    NotFound(String),

    /// Content is not JSON or lacks the `url` field.
    #[error("malformed blob: {0}")]
    MalformedBlob(String),
}

/// Registry (ledger) failures.
///
/// `AlreadyRegistered` and `WrongLength` are the ledger's own rejections and are
/// propagated as-is; `UserDenied` means the signer declined and is not an error
/// worth reporting loudly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("code is already registered")]
    AlreadyRegistered,

    #[error("code has the wrong length")]
    WrongLength,

    #[error("signature request denied by the user")]
    UserDenied,

    #[error("transaction {0} reverted")]
    TransactionFailed(TxHandle),

    /// Any other rejection of a state-changing call.
    #[error("registry rejected the call: {0}")]
    Rejected(String),

    #[error("registry transport error: {0}")]
    Transport(String),

    #[error("invalid registry response: {0}")]
    InvalidResponse(String),
}
