//! Clip registry contract reached over Ethereum JSON-RPC.
//!
//! Reads (`eth_call`, receipts, block height) go to the node; the write goes
//! to the signer endpoint, i.e. the wallet that prompts the user and signs
//! `eth_sendTransaction`.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

use ic_core::clip::ClipCode;
use ic_core::config::RegistryConfig;
use ic_core::ids::{ContentId, TxHandle, WalletAddress};
use ic_core::ports::{RegistryError, RegistryPort};

use super::abi::{self, RETRIEVE_SIGNATURE, STORE_SIGNATURE};
use super::rpc::{parse_quantity, JsonRpcClient, RpcError};

/// EIP-1193 "User Rejected Request".
const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Clone)]
pub struct EvmRegistryConfig {
    pub rpc_url: String,
    pub signer_url: String,
    pub contract_address: String,
    pub from: Option<WalletAddress>,
    pub poll_interval: Duration,
    /// Timeout for node reads. The signer has none: it waits on a human.
    pub read_timeout: Duration,
}

impl EvmRegistryConfig {
    pub fn from_config(config: &RegistryConfig, from: Option<WalletAddress>, read_timeout: Duration) -> Self {
        Self {
            rpc_url: config.rpc_url.clone(),
            signer_url: config.signer_url().to_string(),
            contract_address: config.contract_address.clone(),
            from,
            poll_interval: config.poll_interval(),
            read_timeout,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionReceipt {
    #[serde(default)]
    block_number: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

pub struct EvmRegistry {
    node: JsonRpcClient,
    signer: JsonRpcClient,
    contract: String,
    from: Option<WalletAddress>,
    poll_interval: Duration,
}

impl EvmRegistry {
    pub fn new(config: EvmRegistryConfig) -> anyhow::Result<Self> {
        anyhow::ensure!(
            !config.contract_address.trim().is_empty(),
            "registry contract address is not configured"
        );

        Ok(Self {
            node: JsonRpcClient::new(&config.rpc_url, Some(config.read_timeout))?,
            signer: JsonRpcClient::new(&config.signer_url, None)?,
            contract: config.contract_address.trim().to_string(),
            from: config.from,
            poll_interval: config.poll_interval,
        })
    }

    async fn receipt_block(&self, tx: &TxHandle) -> Result<u64, RegistryError> {
        loop {
            let receipt: Option<TransactionReceipt> = self
                .node
                .call("eth_getTransactionReceipt", json!([tx.as_str()]))
                .await
                .map_err(map_read_error)?;

            if let Some(TransactionReceipt {
                block_number: Some(block),
                status,
            }) = receipt
            {
                if status.as_deref() == Some("0x0") {
                    warn!(tx = %tx, "Registry transaction reverted");
                    return Err(RegistryError::TransactionFailed(tx.clone()));
                }
                return parse_quantity(&block).map_err(map_read_error);
            }

            debug!(tx = %tx, "Transaction pending");
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl RegistryPort for EvmRegistry {
    #[tracing::instrument(name = "infra.registry.store", skip(self), fields(code = %code, cid = %cid))]
    async fn store(&self, code: &ClipCode, cid: &ContentId) -> Result<TxHandle, RegistryError> {
        let data = abi::encode_call(STORE_SIGNATURE, &[code.as_str(), cid.as_str()]);

        let mut tx = json!({
            "to": self.contract,
            "data": abi::encode_hex(&data),
        });
        if let Some(from) = &self.from {
            tx["from"] = Value::String(from.to_string());
        }

        let hash: String = self
            .signer
            .call("eth_sendTransaction", json!([tx]))
            .await
            .map_err(classify_write_error)?;

        info!(tx = %hash, "Submitted registry transaction");
        Ok(TxHandle::from_string(hash))
    }

    #[tracing::instrument(name = "infra.registry.confirm", skip(self), fields(tx = %tx))]
    async fn confirm(&self, tx: &TxHandle, confirmations: u64) -> Result<(), RegistryError> {
        let included = self.receipt_block(tx).await?;

        // Inclusion itself is the first confirmation.
        loop {
            let head: String = self
                .node
                .call("eth_blockNumber", json!([]))
                .await
                .map_err(map_read_error)?;
            let head = parse_quantity(&head).map_err(map_read_error)?;

            if head.saturating_sub(included).saturating_add(1) >= confirmations {
                info!(block = included, head, "Registry transaction confirmed");
                return Ok(());
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    #[tracing::instrument(name = "infra.registry.retrieve", skip(self), fields(code = %code))]
    async fn retrieve(&self, code: &ClipCode) -> Result<Option<ContentId>, RegistryError> {
        let data = abi::encode_call(RETRIEVE_SIGNATURE, &[code.as_str()]);

        let result: String = self
            .node
            .call(
                "eth_call",
                json!([{ "to": self.contract, "data": abi::encode_hex(&data) }, "latest"]),
            )
            .await
            .map_err(map_read_error)?;

        let bytes = abi::decode_hex(&result)
            .map_err(|e| RegistryError::InvalidResponse(e.to_string()))?;
        let pointer = abi::decode_string(&bytes)
            .map_err(|e| RegistryError::InvalidResponse(e.to_string()))?;

        let cid = ContentId::from_string(pointer);
        if cid.is_empty() {
            debug!("Code is not registered");
            return Ok(None);
        }
        Ok(Some(cid))
    }
}

fn map_read_error(err: RpcError) -> RegistryError {
    match err {
        RpcError::Transport(message) => RegistryError::Transport(message),
        RpcError::InvalidResponse(message) => RegistryError::InvalidResponse(message),
        RpcError::Server { code, message, .. } => {
            RegistryError::Transport(format!("rpc error {code}: {message}"))
        }
    }
}

/// Map a failed `eth_sendTransaction` onto the registry error taxonomy.
fn classify_write_error(err: RpcError) -> RegistryError {
    match err {
        RpcError::Transport(message) => RegistryError::Transport(message),
        RpcError::InvalidResponse(message) => RegistryError::InvalidResponse(message),
        RpcError::Server {
            code,
            message,
            data,
        } => {
            if code == USER_REJECTED_CODE || is_user_rejection(&message) {
                return RegistryError::UserDenied;
            }
            let reason = data
                .as_ref()
                .and_then(revert_reason_from_data)
                .unwrap_or(message);
            classify_revert_reason(reason)
        }
    }
}

fn is_user_rejection(message: &str) -> bool {
    let message = message.to_lowercase();
    ["user rejected", "user denied", "rejected by user", "user cancelled", "user canceled"]
        .iter()
        .any(|needle| message.contains(needle))
}

/// Revert data arrives either as a bare hex string or nested as `{"data": "0x.."}`.
fn revert_reason_from_data(data: &Value) -> Option<String> {
    let hex = match data {
        Value::String(hex) => hex.as_str(),
        Value::Object(map) => map.get("data")?.as_str()?,
        _ => return None,
    };
    let bytes = abi::decode_hex(hex).ok()?;
    abi::decode_revert_reason(&bytes)
}

fn classify_revert_reason(reason: String) -> RegistryError {
    let lower = reason.to_lowercase();
    if lower.contains("already") {
        RegistryError::AlreadyRegistered
    } else if lower.contains("length") {
        RegistryError::WrongLength
    } else {
        RegistryError::Rejected(reason)
    }
}
