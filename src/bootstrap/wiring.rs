//! # Dependency Wiring / 依赖注入
//!
//! Builds the infra adapters from `AppConfig` and hands them to the workflow
//! as ports. The only place that names concrete adapter types.

use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;

use ic_app::{ClipDeps, ClipSettings, ClipWorkflow};
use ic_core::config::{AppConfig, DEFAULT_TIMEOUT_SECS};
use ic_core::ports::WalletPort;
use ic_infra::evm::EvmRegistryConfig;
use ic_infra::ipfs::IpfsClientConfig;
use ic_infra::{EvmRegistry, IpfsHttpBlobStore, StaticWallet, SystemClock};

pub fn build_workflow(config: &AppConfig) -> anyhow::Result<ClipWorkflow> {
    let wallet = StaticWallet::new(&config.wallet.address);

    let blob_store = IpfsHttpBlobStore::new(IpfsClientConfig::from(&config.ipfs))
        .context("Failed to create IPFS client")?;

    let registry = EvmRegistry::new(EvmRegistryConfig::from_config(
        &config.registry,
        wallet.address(),
        Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    ))
    .context("Failed to create registry client")?;

    tracing::info!(
        ipfs = %config.ipfs.api_url,
        rpc = %config.registry.rpc_url,
        contract = %config.registry.contract_address,
        anonymous = wallet.address().is_none(),
        "Clip workflow wired"
    );

    Ok(ClipWorkflow::new(
        ClipDeps {
            blob_store: Arc::new(blob_store),
            registry: Arc::new(registry),
            clock: Arc::new(SystemClock),
            wallet: Arc::new(wallet),
        },
        ClipSettings::from_config(config),
    ))
}
