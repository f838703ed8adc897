//! Wallet address source.
//!
//! Signing happens in the wallet behind the signer JSON-RPC endpoint; this
//! side only needs to know which address (if any) owns new clips.

use ic_core::ids::WalletAddress;
use ic_core::ports::WalletPort;

/// Address fixed at startup from config or `--wallet`.
pub struct StaticWallet {
    address: Option<WalletAddress>,
}

impl StaticWallet {
    /// Blank input means no wallet is connected.
    pub fn new(address: &str) -> Self {
        let address = address.trim();
        Self {
            address: (!address.is_empty()).then(|| WalletAddress::from(address)),
        }
    }
}

impl WalletPort for StaticWallet {
    fn address(&self) -> Option<WalletAddress> {
        self.address.clone()
    }
}
