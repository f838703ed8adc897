//! Opaque identifiers handed out by the external stores.
//!
//! None of these are validated here: the blob store and the ledger own their
//! formats, the domain only carries them around.

mod id_macro;

use serde::{Deserialize, Serialize};

use id_macro::impl_id;

/// Content identifier returned by the content-addressed blob store (an IPFS CID).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

/// Wallet address of the clip owner (hex string as reported by the wallet).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

/// Handle of a submitted registry transaction (the transaction hash).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHandle(String);

impl_id!(ContentId, WalletAddress, TxHandle);

impl ContentId {
    /// The registry answers unknown codes with an empty string.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_id_serializes_as_plain_string() {
        let cid = ContentId::from("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG");
        let json = serde_json::to_string(&cid).unwrap();
        assert_eq!(json, "\"QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG\"");
    }

    #[test]
    fn whitespace_content_id_is_empty() {
        assert!(ContentId::from("  ").is_empty());
        assert!(!ContentId::from("Qm1").is_empty());
    }
}
