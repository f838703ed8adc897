use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use ic_core::clip::{clip_seed, derive_code_with_length, iso_timestamp, Clip};
use ic_core::ports::{BlobStorePort, ClockPort, RegistryError, RegistryPort, WalletPort};
use ic_core::workflow::{ClipFailure, ClipFlowEvent, ClipOutcome, ClipSuccess};

use crate::deps::{ClipDeps, ClipSettings};
use crate::tracker::FlowTracker;

/// Use case for turning a URL into a registered clip code.
/// 为 URL 创建短码的用例。
///
/// Steps, each reported through the [`FlowTracker`]:
/// 1. Derive the code from `url`, the creation time and the wallet address.
/// 2. Pin the clip blob in the blob store.
/// 3. Submit `store(code, cid)` through the signer.
/// 4. Wait for the configured confirmation depth.
///
/// A failed step ends the run; nothing is retried.
pub struct CreateClip {
    blob_store: Arc<dyn BlobStorePort>,
    registry: Arc<dyn RegistryPort>,
    clock: Arc<dyn ClockPort>,
    wallet: Arc<dyn WalletPort>,
    settings: ClipSettings,
}

impl CreateClip {
    pub fn from_ports(
        blob_store: Arc<dyn BlobStorePort>,
        registry: Arc<dyn RegistryPort>,
        clock: Arc<dyn ClockPort>,
        wallet: Arc<dyn WalletPort>,
        settings: ClipSettings,
    ) -> Self {
        Self {
            blob_store,
            registry,
            clock,
            wallet,
            settings,
        }
    }

    pub fn from_deps(deps: &ClipDeps, settings: ClipSettings) -> Self {
        Self::from_ports(
            deps.blob_store.clone(),
            deps.registry.clone(),
            deps.clock.clone(),
            deps.wallet.clone(),
            settings,
        )
    }

    /// Build the clip record for `url` as of now.
    fn new_clip(&self, url: &str) -> Clip {
        let created_at = DateTime::<Utc>::from_timestamp_millis(self.clock.now_ms()).unwrap_or_default();
        let owner = self.wallet.address();
        let seed = clip_seed(url, &iso_timestamp(&created_at), owner.as_ref());

        Clip {
            code: derive_code_with_length(&seed, self.settings.code_length),
            source_url: url.to_string(),
            created_at,
            owner,
        }
    }

    #[tracing::instrument(name = "usecase.create_clip.execute", skip(self, tracker), fields(url = %url))]
    pub async fn execute(&self, url: &str, tracker: &mut FlowTracker) -> ClipOutcome {
        let clip = self.new_clip(url);
        let code = clip.code.clone();
        tracker.apply(ClipFlowEvent::CodeDerived { code: code.clone() });
        info!(code = %code, anonymous = clip.owner.is_none(), "Derived clip code");

        let cid = match self.blob_store.upload(&clip.to_blob()).await {
            Ok(cid) => cid,
            Err(e) => {
                warn!(error = %e, "Clip upload failed");
                return fail(tracker, ClipFailure::StoreUnavailable);
            }
        };
        tracker.apply(ClipFlowEvent::BlobUploaded { cid: cid.clone() });

        let tx = match self.registry.store(&code, &cid).await {
            Ok(tx) => tx,
            Err(RegistryError::UserDenied) => {
                info!(code = %code, "Signer declined the registry write");
                tracker.apply(ClipFlowEvent::SignatureDenied);
                return ClipOutcome::Cancelled;
            }
            Err(e) => {
                warn!(code = %code, error = %e, "Registry write failed");
                return fail(tracker, store_failure(&e));
            }
        };
        tracker.apply(ClipFlowEvent::TransactionSubmitted { tx: tx.clone() });

        if let Err(e) = self.registry.confirm(&tx, self.settings.confirmations).await {
            warn!(tx = %tx, error = %e, "Registry transaction did not confirm");
            return fail(tracker, ClipFailure::ConfirmationFailed);
        }
        tracker.apply(ClipFlowEvent::Confirmed);

        info!(code = %code, cid = %cid, "Clip created");
        ClipOutcome::Success(ClipSuccess::Created { code, cid })
    }
}

fn store_failure(err: &RegistryError) -> ClipFailure {
    match err {
        RegistryError::AlreadyRegistered => ClipFailure::AlreadyRegistered,
        RegistryError::WrongLength => ClipFailure::WrongLength,
        _ => ClipFailure::RegistrationFailed,
    }
}

pub(crate) fn fail(tracker: &mut FlowTracker, failure: ClipFailure) -> ClipOutcome {
    tracker.apply(ClipFlowEvent::Fail(failure.clone()));
    ClipOutcome::Failure(failure)
}
