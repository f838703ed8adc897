//! Holds the live workflow state and publishes every transition.

use tokio::sync::watch;
use tracing::debug;

use ic_core::workflow::{ClipFlowEvent, ClipFlowStateMachine, WorkflowState};

/// Applies events to the pure state machine and broadcasts the result.
///
/// 状态推进 + 广播。
pub struct FlowTracker {
    state: WorkflowState,
    sender: watch::Sender<WorkflowState>,
}

impl FlowTracker {
    /// Start from whatever `sender` currently holds.
    pub fn new(sender: watch::Sender<WorkflowState>) -> Self {
        let state = sender.borrow().clone();
        Self { state, sender }
    }

    /// Tracker nobody is subscribed to, for running a use case on its own.
    pub fn detached() -> Self {
        let (sender, _) = watch::channel(WorkflowState::Idle);
        Self::new(sender)
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn subscribe(&self) -> watch::Receiver<WorkflowState> {
        self.sender.subscribe()
    }

    pub fn apply(&mut self, event: ClipFlowEvent) -> &WorkflowState {
        let next = ClipFlowStateMachine::transition(self.state.clone(), event);
        if next != self.state {
            debug!(from = ?self.state, to = ?next, "Workflow transition");
            self.state = next;
            // send_replace never fails, even with no receivers left.
            self.sender.send_replace(self.state.clone());
        }
        &self.state
    }
}
