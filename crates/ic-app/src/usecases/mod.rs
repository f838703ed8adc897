//! Business logic use cases
//!
//! ```text
//! ClipWorkflow::submit
//!         |
//!   classify input
//!     |         |
//! LookupClip  CreateClip
//! ```

pub mod clip_workflow;
pub mod create_clip;
pub mod lookup_clip;

pub use clip_workflow::ClipWorkflow;
pub use create_clip::CreateClip;
pub use lookup_clip::LookupClip;
