//! # ic-core
//!
//! Core domain models and business logic for Interclip.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! clip code derivation, input classification, the clip blob model, the
//! workflow state machine and the ports implemented by `ic-infra`.

pub mod clip;
pub mod config;
pub mod ids;
pub mod ports;
pub mod workflow;

// Re-export commonly used types at the crate root
pub use clip::{classify_input, derive_code, ClipBlob, ClipCode, ClipInput, CODE_LENGTH};
pub use config::AppConfig;
pub use ids::{ContentId, TxHandle, WalletAddress};
pub use workflow::{ClipFailure, ClipOutcome, ClipSuccess, WorkflowState};
