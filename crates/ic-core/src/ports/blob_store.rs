use async_trait::async_trait;
use std::sync::Arc;

use crate::clip::ClipBlob;
use crate::ids::ContentId;
use crate::ports::errors::BlobStoreError;

/// Content-addressed blob store (IPFS).
///
/// No caching: every call is a round trip to the store.
#[async_trait]
pub trait BlobStorePort: Send + Sync {
    /// Serialize `blob` as JSON, pin it and return its content identifier.
    async fn upload(&self, blob: &ClipBlob) -> Result<ContentId, BlobStoreError>;

    /// Fetch and parse the blob stored under `cid`.
    async fn fetch(&self, cid: &ContentId) -> Result<ClipBlob, BlobStoreError>;
}

#[async_trait]
impl<T: BlobStorePort + ?Sized> BlobStorePort for Arc<T> {
    async fn upload(&self, blob: &ClipBlob) -> Result<ContentId, BlobStoreError> {
        (**self).upload(blob).await
    }

    async fn fetch(&self, cid: &ContentId) -> Result<ClipBlob, BlobStoreError> {
        (**self).fetch(cid).await
    }
}
