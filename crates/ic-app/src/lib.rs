//! Interclip Application Orchestration Layer
//!
//! Use cases that drive one clip submission through the ports defined in
//! `ic-core`: creating a clip for a URL and resolving a code back to its URL.

pub mod deps;
pub mod tracker;
pub mod usecases;

pub use deps::{ClipDeps, ClipSettings};
pub use tracker::FlowTracker;
pub use usecases::{ClipWorkflow, CreateClip, LookupClip};
