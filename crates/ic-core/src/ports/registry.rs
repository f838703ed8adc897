use async_trait::async_trait;
use std::sync::Arc;

use crate::clip::ClipCode;
use crate::ids::{ContentId, TxHandle};
use crate::ports::errors::RegistryError;

/// Ledger-backed `code -> content identifier` registry.
#[async_trait]
pub trait RegistryPort: Send + Sync {
    /// Submit `store(code, cid)`.
    ///
    /// Error semantics:
    /// - AlreadyRegistered : code already has a pointer
    /// - WrongLength       : code length rejected by the contract
    /// - UserDenied        : signer declined the request
    async fn store(&self, code: &ClipCode, cid: &ContentId) -> Result<TxHandle, RegistryError>;

    /// Wait until `tx` is `confirmations` blocks deep.
    ///
    /// Fails with `TransactionFailed` when the ledger reports a revert. No timeout.
    async fn confirm(&self, tx: &TxHandle, confirmations: u64) -> Result<(), RegistryError>;

    /// Read-only `retrieve(code)`. `Ok(None)` when the code was never registered.
    async fn retrieve(&self, code: &ClipCode) -> Result<Option<ContentId>, RegistryError>;
}

#[async_trait]
impl<T: RegistryPort + ?Sized> RegistryPort for Arc<T> {
    async fn store(&self, code: &ClipCode, cid: &ContentId) -> Result<TxHandle, RegistryError> {
        (**self).store(code, cid).await
    }

    async fn confirm(&self, tx: &TxHandle, confirmations: u64) -> Result<(), RegistryError> {
        (**self).confirm(tx, confirmations).await
    }

    async fn retrieve(&self, code: &ClipCode) -> Result<Option<ContentId>, RegistryError> {
        (**self).retrieve(code).await
    }
}
