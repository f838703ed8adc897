//! Clip workflow: states, events and terminal outcomes.

mod outcome;
mod state_machine;

pub use outcome::{ClipFailure, ClipOutcome, ClipSuccess};
pub use state_machine::{ClipFlowEvent, ClipFlowStateMachine, CreateStep, LookupStep, WorkflowState};
