//! EVM registry adapter: ABI codec, JSON-RPC transport and the
//! [`RegistryPort`](ic_core::ports::RegistryPort) implementation.

pub mod abi;
mod registry;
pub mod rpc;

pub use registry::{EvmRegistry, EvmRegistryConfig};
