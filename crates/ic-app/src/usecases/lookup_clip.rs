use std::sync::Arc;
use tracing::{info, warn};

use ic_core::clip::ClipCode;
use ic_core::ports::{BlobStorePort, RegistryPort};
use ic_core::workflow::{ClipFailure, ClipFlowEvent, ClipOutcome, ClipSuccess};

use super::create_clip::fail;
use crate::deps::ClipDeps;
use crate::tracker::FlowTracker;

/// Use case for resolving a clip code back to its URL.
/// 短码查询用例。
pub struct LookupClip {
    registry: Arc<dyn RegistryPort>,
    blob_store: Arc<dyn BlobStorePort>,
}

impl LookupClip {
    pub fn from_ports(registry: Arc<dyn RegistryPort>, blob_store: Arc<dyn BlobStorePort>) -> Self {
        Self {
            registry,
            blob_store,
        }
    }

    pub fn from_deps(deps: &ClipDeps) -> Self {
        Self::from_ports(deps.registry.clone(), deps.blob_store.clone())
    }

    /// Query the registry for `code`, then fetch the blob it points to.
    ///
    /// An unregistered code never touches the blob store.
    #[tracing::instrument(name = "usecase.lookup_clip.execute", skip(self, tracker), fields(code = %code))]
    pub async fn execute(&self, code: &ClipCode, tracker: &mut FlowTracker) -> ClipOutcome {
        let cid = match self.registry.retrieve(code).await {
            Ok(Some(cid)) => cid,
            Ok(None) => {
                info!("No clip registered under code");
                return fail(tracker, ClipFailure::CodeNotFound);
            }
            Err(e) => {
                warn!(error = %e, "Registry lookup failed");
                return fail(tracker, ClipFailure::RegistryUnavailable);
            }
        };
        tracker.apply(ClipFlowEvent::PointerResolved { cid: cid.clone() });

        let blob = match self.blob_store.fetch(&cid).await {
            Ok(blob) => blob,
            Err(e) => {
                warn!(cid = %cid, error = %e, "Could not read clip blob");
                return fail(tracker, ClipFailure::InvalidClipFormat);
            }
        };
        tracker.apply(ClipFlowEvent::BlobFetched {
            url: blob.url.clone(),
        });

        info!(cid = %cid, "Clip resolved");
        ClipOutcome::Success(ClipSuccess::Resolved {
            code: code.clone(),
            url: blob.url,
        })
    }
}
