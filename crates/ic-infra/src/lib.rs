pub mod evm;
pub mod ipfs;
pub mod time;
pub mod wallet;

pub use evm::EvmRegistry;
pub use ipfs::IpfsHttpBlobStore;
pub use time::SystemClock;
pub use wallet::StaticWallet;
