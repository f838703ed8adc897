use crate::ids::WalletAddress;

/// Source of the connected wallet's address.
pub trait WalletPort: Send + Sync {
    /// `None` when no wallet is connected (clips are then anonymous).
    fn address(&self) -> Option<WalletAddress>;
}
